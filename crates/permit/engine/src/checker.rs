//! Permission checker trait
//!
//! One checker per permission kind. A checker inspects a typed permission
//! and records zero or more violations; recording nothing grants it.

use crate::error::{PermissionError, Result};
use crate::validation::ExecutionContext;
use permit_types::{AnyPermission, Permission, PermissionKind};

/// Evaluates permissions of a single kind
///
/// ```
/// use permit_engine::{ExecutionContext, PermissionChecker};
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
///
/// struct TransferFundsChecker;
///
/// impl PermissionChecker for TransferFundsChecker {
///     type Permission = TransferFunds;
///
///     fn check(&self, p: &TransferFunds, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
///         if p.amount > p.balance {
///             ctx.add_violation("insufficient balance");
///         }
///         Ok(())
///     }
/// }
///
/// assert_eq!(TransferFundsChecker::permission_kind().name(), "TransferFunds");
/// ```
pub trait PermissionChecker: Send + Sync + 'static {
    /// Permission type this checker handles
    type Permission: Permission;

    /// Inspect `permission` and record violations in `context`
    ///
    /// Returning an error signals that the check itself could not run;
    /// a denied permission is expressed through violations.
    fn check(
        &self,
        permission: &Self::Permission,
        context: &mut ExecutionContext,
    ) -> anyhow::Result<()>;

    /// Kind this checker handles
    fn permission_kind() -> PermissionKind
    where
        Self: Sized,
    {
        <Self::Permission as Permission>::KIND
    }
}

/// Type-erased checker stored in the registry
pub trait DynPermissionChecker: Send + Sync {
    /// Kind this checker handles
    fn kind(&self) -> PermissionKind;

    /// Check a permission whose concrete type is only known at runtime
    fn check_dyn(
        &self,
        permission: &dyn AnyPermission,
        context: &mut ExecutionContext,
    ) -> Result<()>;
}

impl<C: PermissionChecker> DynPermissionChecker for C {
    fn kind(&self) -> PermissionKind {
        C::permission_kind()
    }

    fn check_dyn(
        &self,
        permission: &dyn AnyPermission,
        context: &mut ExecutionContext,
    ) -> Result<()> {
        let typed = permission
            .downcast_ref::<C::Permission>()
            .ok_or(PermissionError::UnexpectedValueType {
                expected: std::any::type_name::<C::Permission>(),
                given: permission.kind().name(),
            })?;

        self.check(typed, context)
            .map_err(|source| PermissionError::CheckerFailed {
                kind: C::permission_kind(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct InviteMember {
        seats_left: u32,
    }

    impl Permission for InviteMember {
        const KIND: PermissionKind = PermissionKind::new("InviteMember");
    }

    #[derive(Debug)]
    struct RemoveMember;

    impl Permission for RemoveMember {
        const KIND: PermissionKind = PermissionKind::new("RemoveMember");
    }

    struct InviteMemberChecker;

    impl PermissionChecker for InviteMemberChecker {
        type Permission = InviteMember;

        fn check(
            &self,
            permission: &InviteMember,
            context: &mut ExecutionContext,
        ) -> anyhow::Result<()> {
            if permission.seats_left == 0 {
                context.add_violation("no seats left");
            }
            Ok(())
        }
    }

    struct UnreachableDirectoryChecker;

    impl PermissionChecker for UnreachableDirectoryChecker {
        type Permission = RemoveMember;

        fn check(&self, _: &RemoveMember, _: &mut ExecutionContext) -> anyhow::Result<()> {
            anyhow::bail!("directory service unreachable")
        }
    }

    #[test]
    fn test_permission_kind_from_associated_type() {
        assert_eq!(InviteMemberChecker::permission_kind(), InviteMember::KIND);
        assert_eq!(InviteMemberChecker.kind(), InviteMember::KIND);
    }

    #[test]
    fn test_check_dyn_dispatches_to_typed_check() {
        let checker: &dyn DynPermissionChecker = &InviteMemberChecker;
        let mut ctx = ExecutionContext::new();

        checker
            .check_dyn(&InviteMember { seats_left: 0 }, &mut ctx)
            .unwrap();
        assert_eq!(ctx.violations().messages(), vec!["no seats left"]);
    }

    #[test]
    fn test_check_dyn_rejects_foreign_permission() {
        let checker: &dyn DynPermissionChecker = &InviteMemberChecker;
        let mut ctx = ExecutionContext::new();

        let err = checker.check_dyn(&RemoveMember, &mut ctx).unwrap_err();
        assert!(matches!(
            err,
            PermissionError::UnexpectedValueType {
                given: "RemoveMember",
                ..
            }
        ));
    }

    #[test]
    fn test_check_dyn_wraps_checker_failure() {
        let checker: &dyn DynPermissionChecker = &UnreachableDirectoryChecker;
        let mut ctx = ExecutionContext::new();

        let err = checker.check_dyn(&RemoveMember, &mut ctx).unwrap_err();
        match err {
            PermissionError::CheckerFailed { kind, source } => {
                assert_eq!(kind, RemoveMember::KIND);
                assert_eq!(source.to_string(), "directory service unreachable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
