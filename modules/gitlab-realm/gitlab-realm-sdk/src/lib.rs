#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! GitLab Realm SDK
//!
//! This crate provides the public contract of the `gitlab_realm` module:
//!
//! - [`Realm`] - Entry points exposed to the host security framework
//! - [`DirectoryClient`] - Remote user-directory lookup consumed by the realm
//! - [`RoleConfigProvider`] - Live role configuration consumed by the realm
//! - [`Credential`], [`Identity`], [`Principal`], [`RoleSet`] - Models
//! - [`AuthFailure`], [`DirectoryError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use gitlab_realm_sdk::{Credential, Realm};
//!
//! let credential = Credential::username_secret("alice", "glpat-...".to_owned());
//! match realm.authenticate(&credential).await? {
//!     Some(principal) => {
//!         let roles = realm.authorize(&principal);
//!     }
//!     None => { /* abstain: let other realms try */ }
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{DirectoryClient, Realm, RoleConfigProvider};
pub use error::{
    AuthFailure, AuthFailureKind, DEFAULT_MESSAGE, DISABLED_USER_MESSAGE, DirectoryError,
};
pub use models::{Credential, DirectoryRecord, Identity, IdentityStatus, Principal, RoleSet};
