//! Security token of the current request

use serde::{Deserialize, Serialize};

/// Identity the authorization checker decides for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityToken {
    /// User identifier, `None` when anonymous
    pub user_identifier: Option<String>,

    /// Roles held by the user
    pub roles: Vec<String>,
}

impl SecurityToken {
    /// Token for an authenticated user
    pub fn new(user_identifier: impl Into<String>) -> Self {
        Self {
            user_identifier: Some(user_identifier.into()),
            roles: Vec::new(),
        }
    }

    /// Token with no user
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Check whether the token carries `role`
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check whether the token is anonymous
    pub fn is_anonymous(&self) -> bool {
        self.user_identifier.is_none()
    }
}
