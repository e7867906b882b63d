//! Permission decisions
//!
//! A decision pairs the grant outcome of one validation pass with the
//! violations that produced it, for read-only presentation.

use crate::permission::PermissionKind;
use crate::violation::ConstraintViolationList;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one permission check
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDecision {
    /// Unique identifier for this decision
    pub id: String,

    /// Kind of the permission that was checked
    pub kind: PermissionKind,

    /// Whether the permission was granted
    pub granted: bool,

    /// Violations recorded by the checker
    pub violations: ConstraintViolationList,

    /// When the decision was made
    pub decided_at: DateTime<Utc>,
}

impl PermissionDecision {
    /// Create a new decision
    pub fn new(kind: PermissionKind, granted: bool, violations: ConstraintViolationList) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            granted,
            violations,
            decided_at: Utc::now(),
        }
    }

    /// Whether the permission was granted
    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Violations that explain a denial
    pub fn violations(&self) -> &ConstraintViolationList {
        &self.violations
    }

    /// First violation message, if any
    pub fn reason(&self) -> Option<&str> {
        self.violations.get(0).map(|v| v.message.as_str())
    }
}

/// Builds decisions from a grant outcome and its violations
pub trait DecisionFactory: Send + Sync {
    /// Create a decision
    fn create_decision(
        &self,
        kind: PermissionKind,
        granted: bool,
        violations: ConstraintViolationList,
    ) -> PermissionDecision;
}

/// Factory producing plain [`PermissionDecision`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDecisionFactory;

impl DecisionFactory for DefaultDecisionFactory {
    fn create_decision(
        &self,
        kind: PermissionKind,
        granted: bool,
        violations: ConstraintViolationList,
    ) -> PermissionDecision {
        PermissionDecision::new(kind, granted, violations)
    }
}
