//! Host validation facility
//!
//! Maps validator names to constraint validators and runs one validation
//! pass with a fresh execution context.

use super::constraint::{Constraint, ConstraintValidator};
use super::context::ExecutionContext;
use crate::error::{PermissionError, Result};
use permit_types::{ConstraintViolationList, Subject};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Validation facility dispatching constraints to their validators
#[derive(Default)]
pub struct Validator {
    validators: HashMap<&'static str, Arc<dyn ConstraintValidator>>,
}

impl Validator {
    /// Create a validator with no constraint validators
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constraint validator under `name`
    pub fn with_constraint_validator(
        mut self,
        name: &'static str,
        validator: Arc<dyn ConstraintValidator>,
    ) -> Self {
        self.validators.insert(name, validator);
        self
    }

    /// Validate `value` against `constraint`
    pub fn validate(
        &self,
        value: Subject<'_>,
        constraint: &dyn Constraint,
    ) -> Result<ConstraintViolationList> {
        let name = constraint.validated_by();
        let validator = self
            .validators
            .get(name)
            .ok_or(PermissionError::ConstraintValidatorNotFound { validator: name })?;

        let mut context = ExecutionContext::new();
        validator.validate(value, constraint, &mut context)?;

        let violations = context.into_violations();
        debug!(
            constraint = name,
            subject = value.type_name(),
            violations = violations.len(),
            "Validated subject"
        );
        Ok(violations)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.validators.keys().collect();
        names.sort();
        f.debug_struct("Validator")
            .field("constraint_validators", &names)
            .finish()
    }
}
