//! Error types for permission validation
//!
//! Only structural misuse is an error. A permission that fails its checks is
//! reported as violations, never through this type.

use permit_types::PermissionKind;
use thiserror::Error;

/// Name of the capability a checker has to implement
pub const CHECKER_CAPABILITY: &str = "permit_engine::PermissionChecker";

/// Permission validation errors
#[derive(Debug, Error)]
pub enum PermissionError {
    /// No checker registered for the permission's kind
    #[error(
        "You need to implement (and register) the permission checker ({capability}) for permission \"{kind}\"."
    )]
    CheckerNotFound {
        kind: PermissionKind,
        capability: &'static str,
    },

    /// A constraint validator received a constraint it does not handle
    #[error("Expected argument of type \"{expected}\", \"{given}\" given")]
    UnexpectedConstraintType {
        expected: &'static str,
        given: &'static str,
    },

    /// A constraint validator received a value it cannot validate
    #[error("Expected argument of type \"{expected}\", \"{given}\" given")]
    UnexpectedValueType {
        expected: &'static str,
        given: &'static str,
    },

    /// The host validator has no validator for a constraint
    #[error("No constraint validator registered under \"{validator}\"")]
    ConstraintValidatorNotFound { validator: &'static str },

    /// Two checkers declared the same permission kind
    #[error("A permission checker is already registered for permission \"{kind}\"")]
    DuplicateChecker { kind: PermissionKind },

    /// The checker itself failed while evaluating
    #[error("Permission checker for \"{kind}\" failed: {source}")]
    CheckerFailed {
        kind: PermissionKind,
        #[source]
        source: anyhow::Error,
    },
}

impl PermissionError {
    /// Build a checker-not-found error for `kind`
    pub fn checker_not_found(kind: PermissionKind) -> Self {
        Self::CheckerNotFound {
            kind,
            capability: CHECKER_CAPABILITY,
        }
    }
}

/// Result type for permission operations
pub type Result<T> = std::result::Result<T, PermissionError>;
