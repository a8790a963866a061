#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! GitLab Realm
//!
//! Pluggable realm that delegates username/secret authentication to a
//! GitLab-like user directory and derives roles from the verified identity.
//!
//! - [`domain::AuthenticationEngine`] turns a credential into a principal
//!   or a classified failure.
//! - [`domain::AuthorizationPolicy`] turns a principal of this realm into a
//!   role set.
//! - [`module::GitlabRealmModule`] composes both, owns the activation flag
//!   and exposes the result as a [`gitlab_realm_sdk::Realm`].
//!
//! ## Configuration
//!
//! ```yaml
//! realm_name: "gitlab-realm"
//! default_roles: ["nx-developer"]
//! admin_roles: ["nx-admin"]
//! admin_gate: active_status
//! static_directory:
//!   users: []
//! ```

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::{AdminGate, ConfigError, GitlabRealmConfig};
pub use module::GitlabRealmModule;

/// Tracing target shared by every log line of this realm.
pub const LOG_TARGET: &str = "gitlab_realm";
