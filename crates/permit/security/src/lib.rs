//! # Permit Security
//!
//! Authorization integration for permission values.
//!
//! ## Key Components
//!
//! - [`PermissionVoter`]: answers permission questions by validating the subject
//! - [`AuthorizationChecker`]: polls voters under an access decision strategy
//! - [`PermissionAuthorizer`]: boolean grant checks and [`PermissionDecision`]s
//! - [`PermissionFunctions`]: `has_permission` / `permission` for templates
//! - [`PermissionBundle`]: startup wiring and per-request scopes
//!
//! ## Example
//!
//! ```rust
//! use permit_engine::{ExecutionContext, PermissionChecker};
//! use permit_security::{PermissionBundle, SecurityToken};
//! use permit_types::{Permission, PermissionKind};
//!
//! #[derive(Debug)]
//! struct EditPage {
//!     locked: bool,
//! }
//!
//! impl Permission for EditPage {
//!     const KIND: PermissionKind = PermissionKind::new("EditPage");
//! }
//!
//! struct EditPageChecker;
//!
//! impl PermissionChecker for EditPageChecker {
//!     type Permission = EditPage;
//!
//!     fn check(&self, p: &EditPage, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
//!         if p.locked {
//!             ctx.add_violation("page is locked");
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), permit_security::SecurityError> {
//! let bundle = PermissionBundle::builder().checker(EditPageChecker).build()?;
//! let scope = bundle.request(SecurityToken::new("erin"));
//!
//! let decision = scope.authorizer().decide(EditPage { locked: true })?;
//! assert!(!decision.granted);
//! assert_eq!(decision.reason(), Some("page is locked"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod authorization;
pub mod authorizer;
pub mod bundle;
pub mod config;
pub mod error;
pub mod functions;
pub mod token;
pub mod voter;

// Re-exports
pub use authorization::{AccessDecisionStrategy, AuthorizationChecker};
pub use authorizer::PermissionAuthorizer;
pub use bundle::{PermissionBundle, PermissionBundleBuilder, RequestScope};
pub use self::config::{PermissionConfig, DEFAULT_SECURITY_ATTRIBUTE};
pub use error::{ConfigError, Result, SecurityError};
pub use functions::{
    PermissionFactories, PermissionFunctions, HAS_PERMISSION_FUNCTION, PERMISSION_FUNCTION,
};
pub use permit_types::PermissionDecision;
pub use token::SecurityToken;
pub use voter::{PermissionVoter, Vote, Voter};
