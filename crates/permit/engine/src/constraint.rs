//! Permission constraint and its validator
//!
//! The permission constraint plugs checker dispatch into the validation
//! component: validating a permission against it resolves the checker for
//! the permission's kind and runs it.

use crate::error::{PermissionError, Result};
use crate::registry::CheckerRegistry;
use crate::validation::{Constraint, ConstraintValidator, ExecutionContext};
use permit_types::Subject;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// Name under which [`PermissionConstraintValidator`] is registered
pub const PERMISSION_CONSTRAINT_VALIDATOR: &str = "permit.permission_constraint_validator";

/// Constraint requiring a permission to pass its checker
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionConstraint;

impl Constraint for PermissionConstraint {
    fn validated_by(&self) -> &'static str {
        PERMISSION_CONSTRAINT_VALIDATOR
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Dispatches permission subjects to their registered checker
#[derive(Debug, Clone)]
pub struct PermissionConstraintValidator {
    registry: Arc<CheckerRegistry>,
}

impl PermissionConstraintValidator {
    /// Create a validator backed by `registry`
    pub fn new(registry: Arc<CheckerRegistry>) -> Self {
        Self { registry }
    }
}

impl ConstraintValidator for PermissionConstraintValidator {
    fn validate(
        &self,
        value: Subject<'_>,
        constraint: &dyn Constraint,
        context: &mut ExecutionContext,
    ) -> Result<()> {
        if !constraint.as_any().is::<PermissionConstraint>() {
            return Err(PermissionError::UnexpectedConstraintType {
                expected: std::any::type_name::<PermissionConstraint>(),
                given: constraint.type_name(),
            });
        }

        let permission = value
            .as_permission()
            .ok_or(PermissionError::UnexpectedValueType {
                expected: "permit_types::AnyPermission",
                given: value.type_name(),
            })?;

        let kind = permission.kind();
        let checker = self.registry.resolve(kind)?;

        debug!(kind = %kind, "Dispatching permission to checker");
        checker.check_dyn(permission, context)
    }
}
