//! Error types for the security layer

use permit_engine::PermissionError;
use thiserror::Error;

/// Configuration errors, raised at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be read or deserialized
    #[error("failed to load permission configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The security attribute is blank
    #[error("invalid security attribute {value:?}: expected a non-blank string")]
    InvalidSecurityAttribute { value: String },
}

/// Errors surfaced by the security layer
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Permission validation failed structurally
    #[error(transparent)]
    Permission(#[from] PermissionError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No factory registered for a permission kind
    #[error("No permission factory registered for permission \"{kind}\"")]
    UnknownPermissionKind { kind: String },

    /// Arguments do not match the kind's factory
    #[error("Invalid arguments for permission \"{kind}\": {source}")]
    InvalidArguments {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    /// Template function name not provided by this extension
    #[error("Unknown permission function \"{name}\"")]
    UnknownFunction { name: String },

    /// Decision could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for security operations
pub type Result<T> = std::result::Result<T, SecurityError>;
