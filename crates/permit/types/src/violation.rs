//! Constraint violations
//!
//! A violation is one recorded reason a permission check failed. Violations
//! are collected in detection order into a [`ConstraintViolationList`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single recorded failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Message with parameters interpolated
    pub message: String,

    /// Message before interpolation
    pub message_template: String,

    /// Interpolation parameters
    pub parameters: BTreeMap<String, String>,

    /// Property path the violation refers to (empty for the root)
    pub property_path: String,

    /// Machine-readable code
    pub code: Option<String>,

    /// Rendering of the offending value
    pub invalid_value: Option<String>,
}

impl ConstraintViolation {
    /// Create a violation on the root path
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message_template: message.clone(),
            message,
            parameters: BTreeMap::new(),
            property_path: String::new(),
            code: None,
            invalid_value: None,
        }
    }

    /// Set the property path
    pub fn with_property_path(mut self, path: impl Into<String>) -> Self {
        self.property_path = path.into();
        self
    }

    /// Set the code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property_path.is_empty() {
            write!(f, "{}", self.message)?;
        } else {
            write!(f, "{}: {}", self.property_path, self.message)?;
        }
        if let Some(code) = &self.code {
            write!(f, " (code {})", code)?;
        }
        Ok(())
    }
}

/// Ordered list of violations from one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintViolationList {
    violations: Vec<ConstraintViolation>,
}

impl ConstraintViolationList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation
    pub fn add(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation at `index`
    pub fn get(&self, index: usize) -> Option<&ConstraintViolation> {
        self.violations.get(index)
    }

    /// Iterate in detection order
    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation> {
        self.violations.iter()
    }

    /// Violations recorded with the given code
    pub fn find_by_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a ConstraintViolation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.code.as_deref() == Some(code))
    }

    /// Messages in detection order
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }
}

impl From<Vec<ConstraintViolation>> for ConstraintViolationList {
    fn from(violations: Vec<ConstraintViolation>) -> Self {
        Self { violations }
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolationList {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ConstraintViolationList {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolationList {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ConstraintViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}
