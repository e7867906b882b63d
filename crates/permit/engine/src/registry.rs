//! Checker registry
//!
//! Maps each permission kind to the one checker that handles it. The
//! registry is built once at startup and is immutable afterwards.

use crate::checker::{DynPermissionChecker, PermissionChecker};
use crate::error::{PermissionError, Result};
use permit_types::PermissionKind;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Registry of permission checkers indexed by kind
#[derive(Default)]
pub struct CheckerRegistry {
    checkers: HashMap<PermissionKind, Arc<dyn DynPermissionChecker>>,
}

impl CheckerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a registry
    pub fn builder() -> CheckerRegistryBuilder {
        CheckerRegistryBuilder::new()
    }

    /// Register a checker under the kind it declares
    ///
    /// Registering a second checker for the same kind is an error.
    pub fn register<C: PermissionChecker>(&mut self, checker: C) -> Result<()> {
        self.register_dyn(Arc::new(checker))
    }

    /// Register an already type-erased checker
    pub fn register_dyn(&mut self, checker: Arc<dyn DynPermissionChecker>) -> Result<()> {
        let kind = checker.kind();
        if self.checkers.contains_key(&kind) {
            return Err(PermissionError::DuplicateChecker { kind });
        }

        debug!(kind = %kind, "Registered permission checker");
        self.checkers.insert(kind, checker);
        Ok(())
    }

    /// Resolve the checker for `kind`
    pub fn resolve(&self, kind: PermissionKind) -> Result<Arc<dyn DynPermissionChecker>> {
        self.checkers
            .get(&kind)
            .cloned()
            .ok_or_else(|| PermissionError::checker_not_found(kind))
    }

    /// Whether a checker is registered for `kind`
    pub fn contains(&self, kind: PermissionKind) -> bool {
        self.checkers.contains_key(&kind)
    }

    /// Registered kinds, sorted by name
    pub fn kinds(&self) -> Vec<PermissionKind> {
        let mut kinds: Vec<_> = self.checkers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Number of registered checkers
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// True when no checker is registered
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Builder for [`CheckerRegistry`]
#[derive(Default)]
pub struct CheckerRegistryBuilder {
    checkers: Vec<Arc<dyn DynPermissionChecker>>,
}

impl CheckerRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a checker
    pub fn checker<C: PermissionChecker>(mut self, checker: C) -> Self {
        self.checkers.push(Arc::new(checker));
        self
    }

    /// Add an already type-erased checker
    pub fn checker_dyn(mut self, checker: Arc<dyn DynPermissionChecker>) -> Self {
        self.checkers.push(checker);
        self
    }

    /// Build the registry, failing on the first duplicate kind
    pub fn build(self) -> Result<CheckerRegistry> {
        let mut registry = CheckerRegistry::new();
        for checker in self.checkers {
            registry.register_dyn(checker)?;
        }
        Ok(registry)
    }
}
