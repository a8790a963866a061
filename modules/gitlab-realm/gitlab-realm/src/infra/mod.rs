//! Infrastructure adapters: live role configuration and the static directory.

pub mod role_config;
pub mod static_directory;

pub use role_config::{LiveRoleConfig, RoleConfig};
pub use static_directory::StaticDirectory;
