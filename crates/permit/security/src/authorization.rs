//! Authorization checker
//!
//! Polls every voter about an (attribute, subject) question and combines
//! the votes with an access decision strategy.

use crate::token::SecurityToken;
use crate::voter::{Vote, Voter};
use permit_engine::Result;
use permit_types::Subject;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// How votes are combined into a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecisionStrategy {
    /// Grant as soon as one voter grants
    #[default]
    Affirmative,

    /// Grant when more voters grant than deny
    Consensus,

    /// Grant only when no voter denies
    Unanimous,

    /// The first voter that does not abstain decides
    Priority,
}

/// Generic authorization facility over a set of voters
#[derive(Debug)]
pub struct AuthorizationChecker {
    token: SecurityToken,
    voters: Vec<Arc<dyn Voter>>,
    strategy: AccessDecisionStrategy,
    allow_if_all_abstain: bool,
    allow_if_equal_granted_denied: bool,
}

impl AuthorizationChecker {
    /// Create a checker for `token` with the affirmative strategy
    pub fn new(token: SecurityToken, voters: Vec<Arc<dyn Voter>>) -> Self {
        Self {
            token,
            voters,
            strategy: AccessDecisionStrategy::Affirmative,
            allow_if_all_abstain: false,
            allow_if_equal_granted_denied: true,
        }
    }

    /// Set the decision strategy
    pub fn with_strategy(mut self, strategy: AccessDecisionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the outcome when every voter abstains
    pub fn with_allow_if_all_abstain(mut self, allow: bool) -> Self {
        self.allow_if_all_abstain = allow;
        self
    }

    /// Set the consensus tie-break
    pub fn with_allow_if_equal_granted_denied(mut self, allow: bool) -> Self {
        self.allow_if_equal_granted_denied = allow;
        self
    }

    /// Token decisions are made for
    pub fn token(&self) -> &SecurityToken {
        &self.token
    }

    /// Configured strategy
    pub fn strategy(&self) -> AccessDecisionStrategy {
        self.strategy
    }

    /// Check whether `attribute` is granted on `subject`
    pub fn is_granted(&self, attribute: &str, subject: Subject<'_>) -> Result<bool> {
        self.decide(&[attribute], subject)
    }

    /// Check whether the attributes are granted on `subject`
    pub fn decide(&self, attributes: &[&str], subject: Subject<'_>) -> Result<bool> {
        let granted = match self.strategy {
            AccessDecisionStrategy::Affirmative => self.decide_affirmative(attributes, subject)?,
            AccessDecisionStrategy::Consensus => self.decide_consensus(attributes, subject)?,
            AccessDecisionStrategy::Unanimous => self.decide_unanimous(attributes, subject)?,
            AccessDecisionStrategy::Priority => self.decide_priority(attributes, subject)?,
        };

        debug!(
            attributes = ?attributes,
            subject = subject.type_name(),
            strategy = ?self.strategy,
            granted = granted,
            "Access decision"
        );
        Ok(granted)
    }

    fn poll(
        &self,
        voter: &Arc<dyn Voter>,
        attributes: &[&str],
        subject: Subject<'_>,
    ) -> Result<Vote> {
        let vote = voter.vote(&self.token, subject, attributes)?;
        debug!(voter = voter.id(), vote = ?vote, "Voter cast vote");
        Ok(vote)
    }

    fn decide_affirmative(&self, attributes: &[&str], subject: Subject<'_>) -> Result<bool> {
        let mut denied = 0;
        for voter in &self.voters {
            match self.poll(voter, attributes, subject)? {
                Vote::Granted => return Ok(true),
                Vote::Denied => denied += 1,
                Vote::Abstain => {}
            }
        }

        if denied > 0 {
            return Ok(false);
        }
        Ok(self.allow_if_all_abstain)
    }

    fn decide_consensus(&self, attributes: &[&str], subject: Subject<'_>) -> Result<bool> {
        let mut granted = 0usize;
        let mut denied = 0usize;
        for voter in &self.voters {
            match self.poll(voter, attributes, subject)? {
                Vote::Granted => granted += 1,
                Vote::Denied => denied += 1,
                Vote::Abstain => {}
            }
        }

        if granted > denied {
            return Ok(true);
        }
        if denied > granted {
            return Ok(false);
        }
        if granted > 0 {
            return Ok(self.allow_if_equal_granted_denied);
        }
        Ok(self.allow_if_all_abstain)
    }

    fn decide_unanimous(&self, attributes: &[&str], subject: Subject<'_>) -> Result<bool> {
        let mut granted = 0;
        for attribute in attributes {
            for voter in &self.voters {
                match self.poll(voter, &[*attribute], subject)? {
                    Vote::Denied => return Ok(false),
                    Vote::Granted => granted += 1,
                    Vote::Abstain => {}
                }
            }
        }

        if granted > 0 {
            return Ok(true);
        }
        Ok(self.allow_if_all_abstain)
    }

    fn decide_priority(&self, attributes: &[&str], subject: Subject<'_>) -> Result<bool> {
        for voter in &self.voters {
            match self.poll(voter, attributes, subject)? {
                Vote::Granted => return Ok(true),
                Vote::Denied => return Ok(false),
                Vote::Abstain => {}
            }
        }
        Ok(self.allow_if_all_abstain)
    }
}
