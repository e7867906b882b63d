//! Wiring
//!
//! [`PermissionBundle`] holds everything built once at startup: the
//! configuration, the checker registry, the validation component and the
//! template factories. Each request gets a [`RequestScope`] with its own
//! permission validator, so the last validation result never leaks between
//! concurrent requests.

use crate::authorization::AuthorizationChecker;
use crate::authorizer::PermissionAuthorizer;
use crate::config::PermissionConfig;
use crate::error::Result;
use crate::functions::{PermissionFactories, PermissionFunctions};
use crate::token::SecurityToken;
use crate::voter::{PermissionVoter, Voter};
use permit_engine::{
    CheckerRegistry, CheckerRegistryBuilder, DynPermissionChecker, PermissionChecker,
    PermissionConstraintValidator, PermissionValidation, PermissionValidator, Validator,
    PERMISSION_CONSTRAINT_VALIDATOR,
};
use permit_types::{DecisionFactory, DefaultDecisionFactory, Permission};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Startup wiring of the permission layer
pub struct PermissionBundle {
    config: PermissionConfig,
    registry: Arc<CheckerRegistry>,
    validator: Arc<Validator>,
    factories: Arc<PermissionFactories>,
    voters: Vec<Arc<dyn Voter>>,
    decision_factory: Arc<dyn DecisionFactory>,
}

impl PermissionBundle {
    /// Start building a bundle
    pub fn builder() -> PermissionBundleBuilder {
        PermissionBundleBuilder::new()
    }

    /// Loaded configuration
    pub fn config(&self) -> &PermissionConfig {
        &self.config
    }

    /// Checker registry
    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    /// Create the per-request services for `token`
    ///
    /// The permission voter is polled first, ahead of any extra voter.
    pub fn request(&self, token: SecurityToken) -> RequestScope {
        let validator = Arc::new(PermissionValidator::new(self.validator.clone()));
        let validation: Arc<dyn PermissionValidation> = validator.clone();

        let mut voters: Vec<Arc<dyn Voter>> = Vec::with_capacity(self.voters.len() + 1);
        voters.push(Arc::new(PermissionVoter::new(
            validation.clone(),
            self.config.security_attribute.clone(),
        )));
        voters.extend(self.voters.iter().cloned());

        let authorization_checker = Arc::new(
            AuthorizationChecker::new(token, voters)
                .with_strategy(self.config.access_decision_strategy)
                .with_allow_if_all_abstain(self.config.allow_if_all_abstain),
        );

        let authorizer = Arc::new(
            PermissionAuthorizer::new(authorization_checker.clone(), validation)
                .with_decision_factory(self.decision_factory.clone())
                .with_audit_decisions(self.config.audit_decisions),
        );

        let functions = PermissionFunctions::new(authorizer.clone(), self.factories.clone());

        RequestScope {
            validator,
            authorization_checker,
            authorizer,
            functions,
        }
    }
}

impl fmt::Debug for PermissionBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionBundle")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("factories", &self.factories)
            .field("voters", &self.voters)
            .finish_non_exhaustive()
    }
}

/// Builder for [`PermissionBundle`]
pub struct PermissionBundleBuilder {
    config: PermissionConfig,
    registry: CheckerRegistryBuilder,
    factories: PermissionFactories,
    voters: Vec<Arc<dyn Voter>>,
    decision_factory: Arc<dyn DecisionFactory>,
}

impl PermissionBundleBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: PermissionConfig::default(),
            registry: CheckerRegistry::builder(),
            factories: PermissionFactories::new(),
            voters: Vec::new(),
            decision_factory: Arc::new(DefaultDecisionFactory),
        }
    }

    /// Use `config`
    pub fn config(mut self, config: PermissionConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a checker
    pub fn checker<C: PermissionChecker>(mut self, checker: C) -> Self {
        self.registry = self.registry.checker(checker);
        self
    }

    /// Register a type-erased checker
    pub fn checker_dyn(mut self, checker: Arc<dyn DynPermissionChecker>) -> Self {
        self.registry = self.registry.checker_dyn(checker);
        self
    }

    /// Register the template factory for `P`
    pub fn factory<P, A, F>(mut self, factory: F) -> Self
    where
        P: Permission,
        A: DeserializeOwned + 'static,
        F: Fn(A) -> P + Send + Sync + 'static,
    {
        self.factories.register(factory);
        self
    }

    /// Poll `voter` after the permission voter
    pub fn voter(mut self, voter: Arc<dyn Voter>) -> Self {
        self.voters.push(voter);
        self
    }

    /// Use a custom decision factory
    pub fn decision_factory(mut self, factory: Arc<dyn DecisionFactory>) -> Self {
        self.decision_factory = factory;
        self
    }

    /// Validate the configuration and build the registry
    pub fn build(self) -> Result<PermissionBundle> {
        self.config.validate()?;

        let registry = Arc::new(self.registry.build()?);
        let validator = Arc::new(Validator::new().with_constraint_validator(
            PERMISSION_CONSTRAINT_VALIDATOR,
            Arc::new(PermissionConstraintValidator::new(registry.clone())),
        ));

        info!(
            checkers = registry.len(),
            voters = self.voters.len() + 1,
            security_attribute = %self.config.security_attribute,
            strategy = ?self.config.access_decision_strategy,
            "Permission bundle initialized"
        );

        Ok(PermissionBundle {
            config: self.config,
            registry,
            validator,
            factories: Arc::new(self.factories),
            voters: self.voters,
            decision_factory: self.decision_factory,
        })
    }
}

impl Default for PermissionBundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Services bound to one request
#[derive(Debug)]
pub struct RequestScope {
    validator: Arc<PermissionValidator>,
    authorization_checker: Arc<AuthorizationChecker>,
    authorizer: Arc<PermissionAuthorizer>,
    functions: PermissionFunctions,
}

impl RequestScope {
    /// Permission validator of this request
    pub fn validator(&self) -> &PermissionValidator {
        &self.validator
    }

    /// Authorization checker of this request
    pub fn authorization_checker(&self) -> &AuthorizationChecker {
        &self.authorization_checker
    }

    /// Authorization adapter of this request
    pub fn authorizer(&self) -> &PermissionAuthorizer {
        &self.authorizer
    }

    /// Template functions of this request
    pub fn functions(&self) -> &PermissionFunctions {
        &self.functions
    }
}
