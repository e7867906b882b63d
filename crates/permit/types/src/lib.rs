//! # Permit Types
//!
//! Value types shared by the permission engine and the security layer.
//!
//! - [`Permission`]: caller-defined access-control question with a static kind
//! - [`AnyPermission`]: object-safe view used for dispatch
//! - [`Subject`]: the value an authorization question is asked about
//! - [`ConstraintViolation`] / [`ConstraintViolationList`]: recorded failures
//! - [`PermissionDecision`]: grant flag plus the violations behind it

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod decision;
pub mod permission;
pub mod subject;
pub mod violation;

pub use decision::{DecisionFactory, DefaultDecisionFactory, PermissionDecision};
pub use permission::{AnyPermission, Permission, PermissionKind};
pub use subject::Subject;
pub use violation::{ConstraintViolation, ConstraintViolationList};
