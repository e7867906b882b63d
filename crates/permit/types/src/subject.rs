//! Authorization subjects
//!
//! The authorization layer asks questions about arbitrary values. A subject
//! is either a permission, some other value, or nothing at all.

use crate::permission::AnyPermission;
use std::any::Any;
use std::fmt;

/// The value an authorization question is asked about
#[derive(Clone, Copy)]
pub enum Subject<'a> {
    /// No subject
    None,

    /// A permission value
    Permission(&'a dyn AnyPermission),

    /// Any other value
    Value {
        /// Type name of the value, for diagnostics
        type_name: &'static str,
        /// The value itself
        value: &'a dyn Any,
    },
}

impl<'a> Subject<'a> {
    /// Wrap a permission
    pub fn permission(permission: &'a dyn AnyPermission) -> Self {
        Self::Permission(permission)
    }

    /// Wrap an arbitrary value
    pub fn value<T: Any>(value: &'a T) -> Self {
        Self::Value {
            type_name: std::any::type_name::<T>(),
            value,
        }
    }

    /// The permission, if this subject is one
    pub fn as_permission(&self) -> Option<&'a dyn AnyPermission> {
        match self {
            Self::Permission(permission) => Some(*permission),
            _ => None,
        }
    }

    /// Type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "null",
            Self::Permission(permission) => permission.kind().name(),
            Self::Value { type_name, .. } => *type_name,
        }
    }
}

impl<'a> From<&'a dyn AnyPermission> for Subject<'a> {
    fn from(permission: &'a dyn AnyPermission) -> Self {
        Self::Permission(permission)
    }
}

impl fmt::Debug for Subject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("Subject::None"),
            Self::Permission(permission) => {
                f.debug_tuple("Subject::Permission").field(permission).finish()
            }
            Self::Value { type_name, .. } => f
                .debug_struct("Subject::Value")
                .field("type_name", type_name)
                .finish_non_exhaustive(),
        }
    }
}
