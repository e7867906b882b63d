//! Authorization adapter
//!
//! Turns permission validation into a boolean for gating and into a
//! [`PermissionDecision`] for presentation.

use crate::authorization::AuthorizationChecker;
use permit_engine::{PermissionValidation, Result};
use permit_types::{
    AnyPermission, DecisionFactory, DefaultDecisionFactory, Permission, PermissionDecision,
    PermissionKind, Subject,
};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Grant checks and decisions for permissions
pub struct PermissionAuthorizer {
    authorization_checker: Arc<AuthorizationChecker>,
    validator: Arc<dyn PermissionValidation>,
    decision_factory: Arc<dyn DecisionFactory>,
    audit_decisions: bool,
}

impl PermissionAuthorizer {
    /// Create an adapter
    ///
    /// `validator` must be the validator the checker's permission voter
    /// validates with; decisions read its last result back.
    pub fn new(
        authorization_checker: Arc<AuthorizationChecker>,
        validator: Arc<dyn PermissionValidation>,
    ) -> Self {
        Self {
            authorization_checker,
            validator,
            decision_factory: Arc::new(DefaultDecisionFactory),
            audit_decisions: true,
        }
    }

    /// Use a custom decision factory
    pub fn with_decision_factory(mut self, factory: Arc<dyn DecisionFactory>) -> Self {
        self.decision_factory = factory;
        self
    }

    /// Set whether decisions are logged
    pub fn with_audit_decisions(mut self, audit: bool) -> Self {
        self.audit_decisions = audit;
        self
    }

    /// Check whether `permission` is granted, asking with `kind` as attribute
    pub fn is_granted(&self, kind: PermissionKind, permission: &dyn AnyPermission) -> Result<bool> {
        self.authorization_checker
            .is_granted(kind.name(), Subject::permission(permission))
    }

    /// Check whether a typed permission is granted
    pub fn is_granted_permission<P: Permission>(&self, permission: &P) -> Result<bool> {
        self.is_granted(P::KIND, permission)
    }

    /// Check a permission and return the decision with its violations
    pub fn decide<P: Permission>(&self, permission: P) -> Result<PermissionDecision> {
        self.decide_dyn(&permission)
    }

    /// Check a permission known only at runtime and return the decision
    ///
    /// The violations are read back from `validator` after the grant check.
    /// They belong to this permission only when a [`PermissionVoter`] backed
    /// by that same validator is polled for `kind`; otherwise they are
    /// whatever the validator recorded last. [`RequestScope`] always polls
    /// its permission voter first.
    ///
    /// [`PermissionVoter`]: crate::voter::PermissionVoter
    /// [`RequestScope`]: crate::bundle::RequestScope
    pub fn decide_dyn(&self, permission: &dyn AnyPermission) -> Result<PermissionDecision> {
        let kind = permission.kind();
        let granted = self.is_granted(kind, permission)?;
        let violations = self.validator.last_violations();

        let decision = self
            .decision_factory
            .create_decision(kind, granted, violations);

        if self.audit_decisions {
            self.log_decision(&decision);
        }
        Ok(decision)
    }

    fn log_decision(&self, decision: &PermissionDecision) {
        let user = self
            .authorization_checker
            .token()
            .user_identifier
            .as_deref()
            .unwrap_or("anonymous");

        let strategy = self.authorization_checker.strategy();

        if decision.granted {
            info!(
                decision_id = %decision.id,
                kind = %decision.kind,
                user = user,
                strategy = ?strategy,
                "Permission granted"
            );
        } else {
            warn!(
                decision_id = %decision.id,
                kind = %decision.kind,
                user = user,
                strategy = ?strategy,
                violations = decision.violations.len(),
                reason = decision.reason().unwrap_or("denied by voter"),
                "Permission denied"
            );
        }
    }
}

impl fmt::Debug for PermissionAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionAuthorizer")
            .field("authorization_checker", &self.authorization_checker)
            .field("audit_decisions", &self.audit_decisions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::SecurityToken;
    use crate::voter::{PermissionVoter, Voter};
    use permit_engine::{
        CheckerRegistry, ExecutionContext, PermissionChecker, PermissionConstraintValidator,
        PermissionError, PermissionValidator, Validator, PERMISSION_CONSTRAINT_VALIDATOR,
    };
    use permit_types::ConstraintViolationList;

    #[derive(Debug)]
    struct RenameChannel {
        name: String,
    }

    impl Permission for RenameChannel {
        const KIND: PermissionKind = PermissionKind::new("RenameChannel");
    }

    #[derive(Debug)]
    struct ArchiveChannel;

    impl Permission for ArchiveChannel {
        const KIND: PermissionKind = PermissionKind::new("ArchiveChannel");
    }

    struct RenameChannelChecker;

    impl PermissionChecker for RenameChannelChecker {
        type Permission = RenameChannel;

        fn check(&self, p: &RenameChannel, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
            if p.name.is_empty() {
                ctx.build_violation("name must not be empty")
                    .at_path("name")
                    .add_violation();
            }
            if p.name.len() > 8 {
                ctx.build_violation("name longer than {{ limit }} characters")
                    .at_path("name")
                    .set_parameter("limit", 8)
                    .add_violation();
            }
            Ok(())
        }
    }

    fn authorizer() -> PermissionAuthorizer {
        let registry = Arc::new(
            CheckerRegistry::builder()
                .checker(RenameChannelChecker)
                .build()
                .unwrap(),
        );
        let validator = Arc::new(Validator::new().with_constraint_validator(
            PERMISSION_CONSTRAINT_VALIDATOR,
            Arc::new(PermissionConstraintValidator::new(registry)),
        ));
        let permissions: Arc<dyn PermissionValidation> =
            Arc::new(PermissionValidator::new(validator));
        let voter: Arc<dyn Voter> = Arc::new(PermissionVoter::new(permissions.clone(), "PERMISSION"));
        let checker = Arc::new(AuthorizationChecker::new(
            SecurityToken::new("bob"),
            vec![voter],
        ));

        PermissionAuthorizer::new(checker, permissions).with_audit_decisions(false)
    }

    #[test]
    fn test_is_granted() {
        let authorizer = authorizer();

        assert!(authorizer
            .is_granted_permission(&RenameChannel {
                name: "general".into()
            })
            .unwrap());
        assert!(!authorizer
            .is_granted_permission(&RenameChannel { name: "".into() })
            .unwrap());
    }

    #[test]
    fn test_is_granted_with_foreign_kind_abstains() {
        let authorizer = authorizer();
        let permission = RenameChannel {
            name: "general".into(),
        };

        // No voter answers "ArchiveChannel" for a RenameChannel subject
        assert!(!authorizer
            .is_granted(ArchiveChannel::KIND, &permission)
            .unwrap());
    }

    #[test]
    fn test_decide_granted() {
        let decision = authorizer()
            .decide(RenameChannel {
                name: "general".into(),
            })
            .unwrap();

        assert!(decision.granted);
        assert!(decision.violations.is_empty());
        assert_eq!(decision.kind, RenameChannel::KIND);
    }

    #[test]
    fn test_decide_denied_with_violations() {
        let decision = authorizer()
            .decide(RenameChannel {
                name: "a-very-long-name".into(),
            })
            .unwrap();

        assert!(!decision.granted);
        assert_eq!(decision.violations.len(), 1);
        assert_eq!(decision.reason(), Some("name longer than 8 characters"));
        assert_eq!(decision.violations.get(0).unwrap().property_path, "name");
    }

    #[test]
    fn test_decide_reflects_only_latest_call() {
        let authorizer = authorizer();

        let denied = authorizer.decide(RenameChannel { name: "".into() }).unwrap();
        let granted = authorizer
            .decide(RenameChannel {
                name: "random".into(),
            })
            .unwrap();

        assert_eq!(denied.violations.len(), 1);
        assert!(granted.granted);
        assert!(granted.violations.is_empty());
    }

    #[test]
    fn test_decide_without_checker() {
        let err = authorizer().decide(ArchiveChannel).unwrap_err();
        assert!(matches!(
            err,
            PermissionError::CheckerNotFound { kind, .. } if kind == ArchiveChannel::KIND
        ));
    }

    #[test]
    fn test_decide_without_permission_voter_reads_previous_result() {
        let registry = Arc::new(
            CheckerRegistry::builder()
                .checker(RenameChannelChecker)
                .build()
                .unwrap(),
        );
        let validator = Arc::new(Validator::new().with_constraint_validator(
            PERMISSION_CONSTRAINT_VALIDATOR,
            Arc::new(PermissionConstraintValidator::new(registry)),
        ));
        let permissions: Arc<dyn PermissionValidation> =
            Arc::new(PermissionValidator::new(validator));
        let checker = Arc::new(AuthorizationChecker::new(SecurityToken::new("bob"), vec![]));
        let authorizer =
            PermissionAuthorizer::new(checker, permissions.clone()).with_audit_decisions(false);

        permissions
            .validate(&RenameChannel { name: "".into() })
            .unwrap();
        let decision = authorizer
            .decide(RenameChannel {
                name: "general".into(),
            })
            .unwrap();

        // No voter validated "general", the empty-name result is still there
        assert!(!decision.granted);
        assert_eq!(decision.reason(), Some("name must not be empty"));
    }

    struct CountingFactory;

    impl DecisionFactory for CountingFactory {
        fn create_decision(
            &self,
            kind: PermissionKind,
            granted: bool,
            violations: ConstraintViolationList,
        ) -> PermissionDecision {
            let mut decision = PermissionDecision::new(kind, granted, violations);
            decision.id = format!("custom-{}", decision.violations.len());
            decision
        }
    }

    #[test]
    fn test_custom_decision_factory() {
        let decision = authorizer()
            .with_decision_factory(Arc::new(CountingFactory))
            .decide(RenameChannel { name: "".into() })
            .unwrap();

        assert_eq!(decision.id, "custom-1");
    }
}
