//! Execution context handed to constraint validators and checkers
//!
//! The context is a fresh violation accumulator for one validation pass.
//! Checkers either add a plain message or build a structured violation with
//! a property path, interpolation parameters and a code.

use permit_types::{ConstraintViolation, ConstraintViolationList};
use std::collections::BTreeMap;

/// Violation accumulator for one validation pass
#[derive(Debug, Default)]
pub struct ExecutionContext {
    property_path: String,
    violations: ConstraintViolationList,
}

impl ExecutionContext {
    /// Create an empty context on the root path
    pub fn new() -> Self {
        Self::default()
    }

    /// Current property path (empty for the root)
    pub fn property_path(&self) -> &str {
        &self.property_path
    }

    /// Record a violation with a literal message on the current path
    pub fn add_violation(&mut self, message: impl Into<String>) {
        let violation =
            ConstraintViolation::new(message).with_property_path(self.property_path.clone());
        self.violations.add(violation);
    }

    /// Start building a structured violation from a message template
    ///
    /// Placeholders of the form `{{ name }}` are replaced by parameters set
    /// with [`ViolationBuilder::set_parameter`].
    pub fn build_violation(&mut self, message_template: impl Into<String>) -> ViolationBuilder<'_> {
        let property_path = self.property_path.clone();
        ViolationBuilder {
            context: self,
            message_template: message_template.into(),
            parameters: BTreeMap::new(),
            property_path,
            code: None,
            invalid_value: None,
        }
    }

    /// Run `f` with the property path extended by `segment`
    pub fn in_path<R>(&mut self, segment: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.property_path.clone();
        self.property_path = join_path(&previous, segment);
        let result = f(self);
        self.property_path = previous;
        result
    }

    /// Violations recorded so far
    pub fn violations(&self) -> &ConstraintViolationList {
        &self.violations
    }

    /// Consume the context and return its violations
    pub fn into_violations(self) -> ConstraintViolationList {
        self.violations
    }
}

/// Builder for a structured violation
#[must_use = "a violation is only recorded once add_violation() is called"]
pub struct ViolationBuilder<'a> {
    context: &'a mut ExecutionContext,
    message_template: String,
    parameters: BTreeMap<String, String>,
    property_path: String,
    code: Option<String>,
    invalid_value: Option<String>,
}

impl ViolationBuilder<'_> {
    /// Extend the property path relative to the context's current path
    pub fn at_path(mut self, path: &str) -> Self {
        self.property_path = join_path(&self.property_path, path);
        self
    }

    /// Set an interpolation parameter
    pub fn set_parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.insert(name.into(), value.to_string());
        self
    }

    /// Set a machine-readable code
    pub fn set_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Record a rendering of the offending value
    pub fn set_invalid_value(mut self, value: impl ToString) -> Self {
        self.invalid_value = Some(value.to_string());
        self
    }

    /// Interpolate the message and record the violation
    pub fn add_violation(self) {
        let message = interpolate(&self.message_template, &self.parameters);
        self.context.violations.add(ConstraintViolation {
            message,
            message_template: self.message_template,
            parameters: self.parameters,
            property_path: self.property_path,
            code: self.code,
            invalid_value: self.invalid_value,
        });
    }
}

fn join_path(base: &str, segment: &str) -> String {
    match (base.is_empty(), segment.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => segment.to_string(),
        (false, false) if segment.starts_with('[') => format!("{}{}", base, segment),
        (false, false) => format!("{}.{}", base, segment),
    }
}

fn interpolate(template: &str, parameters: &BTreeMap<String, String>) -> String {
    let mut message = String::with_capacity(template.len());
    let mut rest = template;

    // Single pass: substituted values are never scanned again
    while let Some(start) = rest.find("{{") {
        message.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        match parameters.get(after[..end].trim()) {
            Some(value) => {
                message.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                message.push_str("{{");
                rest = after;
            }
        }
    }

    message.push_str(rest);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_plain_violation() {
        let mut ctx = ExecutionContext::new();
        ctx.add_violation("insufficient balance");

        let violations = ctx.into_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.get(0).unwrap().message, "insufficient balance");
        assert_eq!(violations.get(0).unwrap().property_path, "");
    }

    #[test]
    fn test_build_violation_interpolates() {
        let mut ctx = ExecutionContext::new();
        ctx.build_violation("amount {{ amount }} exceeds balance {{balance}}")
            .at_path("amount")
            .set_parameter("amount", 150)
            .set_parameter("balance", 100)
            .set_code("INSUFFICIENT_BALANCE")
            .set_invalid_value(150)
            .add_violation();

        let violation = ctx.violations().get(0).unwrap().clone();
        assert_eq!(violation.message, "amount 150 exceeds balance 100");
        assert_eq!(
            violation.message_template,
            "amount {{ amount }} exceeds balance {{balance}}"
        );
        assert_eq!(violation.property_path, "amount");
        assert_eq!(violation.code.as_deref(), Some("INSUFFICIENT_BALANCE"));
        assert_eq!(violation.invalid_value.as_deref(), Some("150"));
    }

    #[test]
    fn test_nested_paths() {
        let mut ctx = ExecutionContext::new();
        ctx.in_path("account", |ctx| {
            ctx.add_violation("is frozen");
            ctx.build_violation("owner missing")
                .at_path("owner")
                .add_violation();
            ctx.build_violation("bad entry")
                .at_path("[2]")
                .add_violation();
        });
        ctx.add_violation("root");

        let paths: Vec<_> = ctx
            .violations()
            .iter()
            .map(|v| v.property_path.as_str())
            .collect();
        assert_eq!(paths, vec!["account", "account.owner", "account[2]", ""]);
        assert_eq!(ctx.property_path(), "");
    }

    #[test]
    fn test_detection_order() {
        let mut ctx = ExecutionContext::new();
        ctx.add_violation("first");
        ctx.build_violation("second").add_violation();
        ctx.add_violation("third");

        assert_eq!(ctx.violations().messages(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parameter_values_are_not_interpolated_again() {
        let mut ctx = ExecutionContext::new();
        ctx.build_violation("user {{ a }} lacks {{ b }}")
            .set_parameter("a", "{{ b }}")
            .set_parameter("b", "admin")
            .add_violation();

        assert_eq!(
            ctx.violations().get(0).unwrap().message,
            "user {{ b }} lacks admin"
        );
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let mut ctx = ExecutionContext::new();
        ctx.build_violation("{{ missing }} and {{ known }} and {{ open")
            .set_parameter("known", "value")
            .add_violation();

        assert_eq!(
            ctx.violations().get(0).unwrap().message,
            "{{ missing }} and value and {{ open"
        );
    }
}
