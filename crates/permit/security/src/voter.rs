//! Voters
//!
//! A voter casts a vote on an (attribute, subject) question or abstains when
//! it does not support it. The permission voter answers permission
//! questions by validating the permission.

use crate::token::SecurityToken;
use permit_engine::{PermissionValidation, Result};
use permit_types::Subject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A voter's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    /// Access granted
    Granted,

    /// Question not supported
    Abstain,

    /// Access denied
    Denied,
}

impl Vote {
    /// Numeric form: 1 granted, 0 abstain, -1 denied
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Granted => 1,
            Self::Abstain => 0,
            Self::Denied => -1,
        }
    }
}

/// Casts votes on authorization questions
pub trait Voter: Send + Sync + fmt::Debug {
    /// Unique identifier for this voter
    fn id(&self) -> &str;

    /// Whether this voter answers `attribute` for `subject`
    fn supports(&self, attribute: &str, subject: Subject<'_>) -> bool;

    /// Vote on `subject` for the given attributes
    ///
    /// Abstains when no attribute is supported. Otherwise the vote is
    /// granted as soon as one supported attribute is granted.
    fn vote(
        &self,
        token: &SecurityToken,
        subject: Subject<'_>,
        attributes: &[&str],
    ) -> Result<Vote> {
        let mut vote = Vote::Abstain;
        for attribute in attributes {
            if !self.supports(attribute, subject) {
                continue;
            }

            vote = Vote::Denied;
            if self.vote_on_attribute(attribute, subject, token)? {
                return Ok(Vote::Granted);
            }
        }
        Ok(vote)
    }

    /// Answer one supported attribute
    fn vote_on_attribute(
        &self,
        attribute: &str,
        subject: Subject<'_>,
        token: &SecurityToken,
    ) -> Result<bool>;
}

/// Grants a permission when its checker records no violation
pub struct PermissionVoter {
    validator: Arc<dyn PermissionValidation>,
    security_attribute: String,
}

impl PermissionVoter {
    /// Create a voter answering `security_attribute`
    pub fn new(
        validator: Arc<dyn PermissionValidation>,
        security_attribute: impl Into<String>,
    ) -> Self {
        Self {
            validator,
            security_attribute: security_attribute.into(),
        }
    }
}

impl fmt::Debug for PermissionVoter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionVoter")
            .field("security_attribute", &self.security_attribute)
            .finish_non_exhaustive()
    }
}

impl Voter for PermissionVoter {
    fn id(&self) -> &str {
        "permission"
    }

    fn supports(&self, attribute: &str, subject: Subject<'_>) -> bool {
        match subject.as_permission() {
            Some(permission) => {
                attribute == self.security_attribute || attribute == permission.kind().name()
            }
            None => false,
        }
    }

    fn vote_on_attribute(
        &self,
        attribute: &str,
        subject: Subject<'_>,
        _token: &SecurityToken,
    ) -> Result<bool> {
        let Some(permission) = subject.as_permission() else {
            return Ok(false);
        };

        let violations = self.validator.validate(permission)?;
        debug!(
            attribute = attribute,
            kind = %permission.kind(),
            violations = violations.len(),
            "Permission voter validated subject"
        );
        Ok(violations.is_empty())
    }
}
