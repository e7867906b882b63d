//! Permission values and their kinds
//!
//! A permission is an immutable value encoding one access-control question
//! ("may X do Y to Z"). Its kind is fixed at compile time and is the key used
//! to find the checker that answers the question.

use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt;

/// Discriminator identifying which checker applies to a permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PermissionKind(&'static str);

impl PermissionKind {
    /// Create a kind from its name
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Name of the kind
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for PermissionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// A caller-defined permission value
///
/// ```
/// use permit_types::{Permission, PermissionKind};
///
/// #[derive(Debug)]
/// struct TransferFunds {
///     amount: u64,
///     balance: u64,
/// }
///
/// impl Permission for TransferFunds {
///     const KIND: PermissionKind = PermissionKind::new("TransferFunds");
/// }
/// ```
pub trait Permission: Any + Send + Sync + fmt::Debug {
    /// Kind handled by exactly one registered checker
    const KIND: PermissionKind;
}

/// Object-safe view over any [`Permission`]
pub trait AnyPermission: Any + Send + Sync + fmt::Debug + 'static {
    /// Runtime kind of this permission
    fn kind(&self) -> PermissionKind;

    /// Access the concrete value for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<P: Permission> AnyPermission for P {
    fn kind(&self) -> PermissionKind {
        P::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn AnyPermission {
    /// Downcast to a concrete permission type
    pub fn downcast_ref<P: Permission>(&self) -> Option<&P> {
        self.as_any().downcast_ref::<P>()
    }

    /// Check whether this permission is of kind `P`
    pub fn is<P: Permission>(&self) -> bool {
        self.as_any().is::<P>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct ReadDocument {
        document_id: String,
    }

    impl Permission for ReadDocument {
        const KIND: PermissionKind = PermissionKind::new("ReadDocument");
    }

    #[derive(Debug)]
    struct EditDocument;

    impl Permission for EditDocument {
        const KIND: PermissionKind = PermissionKind::new("EditDocument");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ReadDocument::KIND.to_string(), "ReadDocument");
        assert_eq!(ReadDocument::KIND.name(), "ReadDocument");
    }

    #[test]
    fn test_kind_identity() {
        assert_eq!(ReadDocument::KIND, PermissionKind::new("ReadDocument"));
        assert_ne!(ReadDocument::KIND, EditDocument::KIND);
    }

    #[test]
    fn test_any_permission_downcast() {
        let permission: Box<dyn AnyPermission> = Box::new(ReadDocument {
            document_id: "doc-1".into(),
        });

        assert_eq!(permission.kind(), ReadDocument::KIND);
        assert!(permission.is::<ReadDocument>());
        assert!(permission.downcast_ref::<EditDocument>().is_none());

        let read = permission.downcast_ref::<ReadDocument>().unwrap();
        assert_eq!(read.document_id, "doc-1");
    }
}
