//! Permission validator
//!
//! Validates one permission at a time against the permission constraint and
//! keeps the result of the last successful pass.
//!
//! The last-result slot is plain per-instance state: it is overwritten by
//! every call. Use one validator per logical request; two requests sharing
//! an instance observe each other's results.

use crate::constraint::PermissionConstraint;
use crate::error::Result;
use crate::validation::Validator;
use permit_types::{AnyPermission, ConstraintViolationList, Subject};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Validates permissions and exposes the last result
pub trait PermissionValidation: Send + Sync {
    /// Validate `permission` and return its violations
    fn validate(&self, permission: &dyn AnyPermission) -> Result<ConstraintViolationList>;

    /// Violations from the most recent successful validation
    fn last_violations(&self) -> ConstraintViolationList;
}

/// Default [`PermissionValidation`] backed by the validation component
#[derive(Debug)]
pub struct PermissionValidator {
    validator: Arc<Validator>,
    last_violations: Mutex<ConstraintViolationList>,
}

impl PermissionValidator {
    /// Create a validator with an empty last result
    pub fn new(validator: Arc<Validator>) -> Self {
        Self {
            validator,
            last_violations: Mutex::new(ConstraintViolationList::new()),
        }
    }
}

impl PermissionValidation for PermissionValidator {
    fn validate(&self, permission: &dyn AnyPermission) -> Result<ConstraintViolationList> {
        let violations = self
            .validator
            .validate(Subject::permission(permission), &PermissionConstraint)?;

        debug!(
            kind = %permission.kind(),
            violations = violations.len(),
            "Validated permission"
        );

        *self
            .last_violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = violations.clone();
        Ok(violations)
    }

    fn last_violations(&self) -> ConstraintViolationList {
        self.last_violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
