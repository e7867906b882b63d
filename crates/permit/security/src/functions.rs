//! Template functions
//!
//! Read-only permission queries for presentation layers:
//!
//! - `has_permission(kind, args...)` → `bool`
//! - `permission(kind, args...)` → decision with violations
//!
//! Templates only know kinds by name and pass loosely typed arguments. Each
//! kind therefore registers a typed factory whose argument type is
//! deserialized from the argument list.

use crate::authorizer::PermissionAuthorizer;
use crate::error::{Result, SecurityError};
use permit_types::{AnyPermission, Permission, PermissionDecision, PermissionKind};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name of the boolean template function
pub const HAS_PERMISSION_FUNCTION: &str = "has_permission";

/// Name of the decision template function
pub const PERMISSION_FUNCTION: &str = "permission";

type Factory = Box<dyn Fn(&[Value]) -> Result<Box<dyn AnyPermission>> + Send + Sync>;

/// Per-kind permission constructors keyed by kind name
#[derive(Default)]
pub struct PermissionFactories {
    factories: HashMap<&'static str, Factory>,
}

impl PermissionFactories {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for `P`
    ///
    /// The template argument list is deserialized into `A`, so a factory
    /// taking `(u64, u64)` accepts `[150, 100]`. A single argument may also
    /// be deserialized on its own, so a factory taking `u32` accepts `[3]`.
    /// Kinds without arguments use `A = ()`.
    pub fn register<P, A, F>(&mut self, factory: F)
    where
        P: Permission,
        A: DeserializeOwned + 'static,
        F: Fn(A) -> P + Send + Sync + 'static,
    {
        let kind = P::KIND;
        self.factories.insert(
            kind.name(),
            Box::new(move |args: &[Value]| -> Result<Box<dyn AnyPermission>> {
                let arguments = deserialize_arguments::<A>(kind, args)?;
                Ok(Box::new(factory(arguments)) as Box<dyn AnyPermission>)
            }),
        );
    }

    /// Whether a constructor is registered for `kind`
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Construct a permission of `kind` from template arguments
    pub fn create(&self, kind: &str, args: &[Value]) -> Result<Box<dyn AnyPermission>> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| SecurityError::UnknownPermissionKind {
                kind: kind.to_string(),
            })?;
        factory(args)
    }
}

impl fmt::Debug for PermissionFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("PermissionFactories")
            .field("kinds", &kinds)
            .finish()
    }
}

fn deserialize_arguments<A: DeserializeOwned>(kind: PermissionKind, args: &[Value]) -> Result<A> {
    serde_json::from_value::<A>(Value::Array(args.to_vec()))
        .or_else(|err| {
            // A lone argument may be the whole value, no arguments may be unit
            let fallback = match args {
                [] => Value::Null,
                [single] => single.clone(),
                _ => return Err(err),
            };
            serde_json::from_value::<A>(fallback).map_err(|_| err)
        })
        .map_err(|source| SecurityError::InvalidArguments {
            kind: kind.name().to_string(),
            source,
        })
}

/// Template-facing permission queries
#[derive(Debug, Clone)]
pub struct PermissionFunctions {
    authorizer: Arc<PermissionAuthorizer>,
    factories: Arc<PermissionFactories>,
}

impl PermissionFunctions {
    /// Create the functions
    pub fn new(authorizer: Arc<PermissionAuthorizer>, factories: Arc<PermissionFactories>) -> Self {
        Self {
            authorizer,
            factories,
        }
    }

    /// Whether a permission of `kind` built from `args` is granted
    pub fn has_permission(&self, kind: &str, args: &[Value]) -> Result<bool> {
        let permission = self.factories.create(kind, args)?;
        Ok(self.authorizer.is_granted(permission.kind(), &*permission)?)
    }

    /// Decision for a permission of `kind` built from `args`
    pub fn permission(&self, kind: &str, args: &[Value]) -> Result<PermissionDecision> {
        let permission = self.factories.create(kind, args)?;
        Ok(self.authorizer.decide_dyn(&*permission)?)
    }

    /// Call a function by name, returning a JSON value for the template
    pub fn call(&self, function: &str, kind: &str, args: &[Value]) -> Result<Value> {
        match function {
            HAS_PERMISSION_FUNCTION => Ok(Value::Bool(self.has_permission(kind, args)?)),
            PERMISSION_FUNCTION => Ok(serde_json::to_value(self.permission(kind, args)?)?),
            other => Err(SecurityError::UnknownFunction {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct PinMessage {
        channel: String,
        pinned: u32,
    }

    impl Permission for PinMessage {
        const KIND: PermissionKind = PermissionKind::new("PinMessage");
    }

    #[derive(Debug)]
    struct ClearPins;

    impl Permission for ClearPins {
        const KIND: PermissionKind = PermissionKind::new("ClearPins");
    }

    #[derive(Debug)]
    struct MutePins {
        minutes: u32,
    }

    impl Permission for MutePins {
        const KIND: PermissionKind = PermissionKind::new("MutePins");
    }

    fn factories() -> PermissionFactories {
        let mut factories = PermissionFactories::new();
        factories.register(|minutes: u32| MutePins { minutes });
        factories.register(|(channel, pinned): (String, u32)| PinMessage { channel, pinned });
        factories.register(|(): ()| ClearPins);
        factories
    }

    #[test]
    fn test_create_with_typed_arguments() {
        let permission = factories()
            .create("PinMessage", &[Value::from("general"), Value::from(3)])
            .unwrap();

        assert_eq!(permission.kind(), PinMessage::KIND);
        let pin = permission.downcast_ref::<PinMessage>().unwrap();
        assert_eq!(pin.channel, "general");
        assert_eq!(pin.pinned, 3);
    }

    #[test]
    fn test_create_without_arguments() {
        let permission = factories().create("ClearPins", &[]).unwrap();
        assert!(permission.is::<ClearPins>());
    }

    #[test]
    fn test_create_unknown_kind() {
        let err = factories().create("DeletePins", &[]).unwrap_err();
        assert!(matches!(
            err,
            SecurityError::UnknownPermissionKind { kind } if kind == "DeletePins"
        ));
    }

    #[test]
    fn test_create_with_wrong_arguments() {
        let err = factories()
            .create("PinMessage", &[Value::from(3), Value::from("general")])
            .unwrap_err();
        assert!(matches!(
            err,
            SecurityError::InvalidArguments { ref kind, .. } if kind == "PinMessage"
        ));

        let err = factories().create("PinMessage", &[]).unwrap_err();
        assert!(matches!(err, SecurityError::InvalidArguments { .. }));
    }

    #[test]
    fn test_factories_debug_lists_kinds() {
        let debug = format!("{:?}", factories());
        assert!(debug.contains("ClearPins"));
        assert!(debug.contains("PinMessage"));
    }

    #[test]
    fn test_create_with_single_argument() {
        let permission = factories().create("MutePins", &[Value::from(15)]).unwrap();
        assert_eq!(permission.downcast_ref::<MutePins>().unwrap().minutes, 15);

        let err = factories()
            .create("MutePins", &[Value::from("soon")])
            .unwrap_err();
        assert!(matches!(err, SecurityError::InvalidArguments { .. }));

        let err = factories()
            .create("MutePins", &[Value::from(15), Value::from(30)])
            .unwrap_err();
        assert!(matches!(err, SecurityError::InvalidArguments { .. }));
    }
}
