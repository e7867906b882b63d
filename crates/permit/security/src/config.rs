//! Configuration for the permission layer
//!
//! Loaded once at startup and immutable afterwards. Sources are layered:
//! defaults, then an optional file, then `PERMIT_*` environment variables.

use crate::authorization::AccessDecisionStrategy;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default authorization attribute answered by the permission voter
pub const DEFAULT_SECURITY_ATTRIBUTE: &str = "PERMISSION";

/// Permission layer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionConfig {
    /// Authorization attribute the permission voter responds to
    #[serde(default = "default_security_attribute")]
    pub security_attribute: String,

    /// How voter results are combined
    #[serde(default)]
    pub access_decision_strategy: AccessDecisionStrategy,

    /// Outcome when every voter abstains
    #[serde(default)]
    pub allow_if_all_abstain: bool,

    /// Log every permission decision
    #[serde(default = "default_true")]
    pub audit_decisions: bool,
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            security_attribute: default_security_attribute(),
            access_decision_strategy: AccessDecisionStrategy::default(),
            allow_if_all_abstain: false,
            audit_decisions: true,
        }
    }
}

fn default_security_attribute() -> String {
    DEFAULT_SECURITY_ATTRIBUTE.to_string()
}

fn default_true() -> bool {
    true
}

/// `PERMIT_*` variables, `__` between nested keys
fn environment() -> config::Environment {
    config::Environment::with_prefix("PERMIT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl PermissionConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with_environment(path, environment())
    }

    fn load_with_environment(
        path: Option<&str>,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config: Self = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a string in the given format
    pub fn from_source(source: &str, format: config::FileFormat) -> Result<Self, ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from_str(source, format))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Set the security attribute
    pub fn with_security_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.security_attribute = attribute.into();
        self
    }

    /// Set the access decision strategy
    pub fn with_access_decision_strategy(mut self, strategy: AccessDecisionStrategy) -> Self {
        self.access_decision_strategy = strategy;
        self
    }

    /// Set whether decisions are logged
    pub fn with_audit_decisions(mut self, audit: bool) -> Self {
        self.audit_decisions = audit;
        self
    }

    /// Reject configurations that cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security_attribute.trim().is_empty() {
            return Err(ConfigError::InvalidSecurityAttribute {
                value: self.security_attribute.clone(),
            });
        }
        Ok(())
    }
}
