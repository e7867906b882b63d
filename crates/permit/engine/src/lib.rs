//! # Permit Engine
//!
//! Checker dispatch for permission values.
//!
//! ## Key Components
//!
//! - [`PermissionChecker`]: one evaluator per permission kind
//! - [`CheckerRegistry`]: kind → checker table built at startup
//! - [`PermissionConstraint`] / [`PermissionConstraintValidator`]: plug
//!   checker dispatch into the validation component
//! - [`PermissionValidator`]: validates one permission, keeps the last result
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use permit_engine::{
//!     CheckerRegistry, ExecutionContext, PermissionChecker, PermissionConstraintValidator,
//!     PermissionValidation, PermissionValidator, Validator, PERMISSION_CONSTRAINT_VALIDATOR,
//! };
//! use permit_types::{Permission, PermissionKind};
//!
//! #[derive(Debug)]
//! struct TransferFunds {
//!     amount: u64,
//!     balance: u64,
//! }
//!
//! impl Permission for TransferFunds {
//!     const KIND: PermissionKind = PermissionKind::new("TransferFunds");
//! }
//!
//! struct TransferFundsChecker;
//!
//! impl PermissionChecker for TransferFundsChecker {
//!     type Permission = TransferFunds;
//!
//!     fn check(&self, p: &TransferFunds, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
//!         if p.amount > p.balance {
//!             ctx.add_violation("insufficient balance");
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), permit_engine::PermissionError> {
//! let registry = Arc::new(CheckerRegistry::builder().checker(TransferFundsChecker).build()?);
//! let validator = Validator::new().with_constraint_validator(
//!     PERMISSION_CONSTRAINT_VALIDATOR,
//!     Arc::new(PermissionConstraintValidator::new(registry)),
//! );
//! let permissions = PermissionValidator::new(Arc::new(validator));
//!
//! let violations = permissions.validate(&TransferFunds { amount: 150, balance: 100 })?;
//! assert_eq!(violations.len(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod checker;
pub mod constraint;
pub mod error;
pub mod registry;
pub mod validation;
pub mod validator;

// Re-exports
pub use checker::{DynPermissionChecker, PermissionChecker};
pub use constraint::{
    PermissionConstraint, PermissionConstraintValidator, PERMISSION_CONSTRAINT_VALIDATOR,
};
pub use error::{PermissionError, Result, CHECKER_CAPABILITY};
pub use registry::{CheckerRegistry, CheckerRegistryBuilder};
pub use validation::{
    Constraint, ConstraintValidator, ExecutionContext, Validator, ViolationBuilder,
};
pub use validator::{PermissionValidation, PermissionValidator};
