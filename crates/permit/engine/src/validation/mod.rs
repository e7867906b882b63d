//! Validation component
//!
//! A minimal constraint-validation facility: constraints name the validator
//! that handles them, validators record violations in an
//! [`ExecutionContext`], and [`Validator`] runs one pass per call.

pub mod constraint;
pub mod context;
pub mod validator;

pub use constraint::{Constraint, ConstraintValidator};
pub use context::{ExecutionContext, ViolationBuilder};
pub use validator::Validator;
