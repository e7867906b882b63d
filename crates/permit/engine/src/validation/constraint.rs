//! Constraint and constraint validator traits

use super::context::ExecutionContext;
use crate::error::Result;
use permit_types::Subject;
use std::any::Any;
use std::fmt;

/// A rule a value is validated against
pub trait Constraint: Any + Send + Sync + fmt::Debug {
    /// Name of the constraint validator that handles this constraint
    fn validated_by(&self) -> &'static str;

    /// Type name used in diagnostics
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Access the concrete constraint for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Validates values against one family of constraints
pub trait ConstraintValidator: Send + Sync {
    /// Validate `value` against `constraint`, recording violations in `context`
    fn validate(
        &self,
        value: Subject<'_>,
        constraint: &dyn Constraint,
        context: &mut ExecutionContext,
    ) -> Result<()>;
}
