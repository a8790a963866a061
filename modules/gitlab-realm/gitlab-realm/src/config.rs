//! Configuration for the GitLab realm.

use std::collections::BTreeSet;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use gitlab_realm_sdk::DirectoryRecord;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::infra::RoleConfig;

/// Prefix of environment variables overriding file configuration.
/// Nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "GITLAB_REALM_";

/// Realm configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitlabRealmConfig {
    /// Name of the realm. Stamped on every principal it authenticates.
    pub realm_name: String,

    /// Roles granted to every principal of this realm.
    pub default_roles: BTreeSet<String>,

    /// Roles granted on top of the defaults when the admin gate opens.
    /// Must not overlap with `default_roles`.
    pub admin_roles: BTreeSet<String>,

    /// Condition that grants `admin_roles`.
    pub admin_gate: AdminGate,

    /// In-memory directory used in development and tests.
    pub static_directory: StaticDirectoryConfig,
}

impl Default for GitlabRealmConfig {
    fn default() -> Self {
        Self {
            realm_name: "gitlab-realm".to_owned(),
            default_roles: BTreeSet::new(),
            admin_roles: BTreeSet::new(),
            admin_gate: AdminGate::default(),
            static_directory: StaticDirectoryConfig::default(),
        }
    }
}

/// Condition under which a principal receives the admin roles.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminGate {
    /// Every active principal is elevated. Since authentication already
    /// requires an active account, every principal of this realm qualifies.
    #[default]
    ActiveStatus,
    /// Only principals the directory flags as administrators are elevated.
    DirectoryAdmin,
}

/// Static directory backend configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticDirectoryConfig {
    pub users: Vec<StaticUserConfig>,
}

/// One user of the static directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticUserConfig {
    /// Token the user must present.
    #[serde(deserialize_with = "secret_string")]
    pub token: SecretString,

    /// Record returned on a successful lookup. `record.username` is the login name.
    pub record: DirectoryRecord,
}

fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("realm_name must not be empty")]
    EmptyRealmName,

    #[error("roles configured as both default and admin roles: {roles}")]
    OverlappingRoles { roles: String },
}

impl GitlabRealmConfig {
    /// Load configuration from an optional YAML file, overridden by
    /// `GITLAB_REALM_*` environment variables, then validate it.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// - `Load` if a source cannot be parsed or has unknown keys
    /// - any error of [`GitlabRealmConfig::validate`]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        let cfg: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants not expressible in the type.
    ///
    /// # Errors
    ///
    /// - `EmptyRealmName` if `realm_name` is blank
    /// - `OverlappingRoles` if a role is both a default and an admin role
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.realm_name.trim().is_empty() {
            return Err(ConfigError::EmptyRealmName);
        }

        check_disjoint_roles(&self.default_roles, &self.admin_roles)
    }

    /// Role part of the configuration, as served to the authorization policy.
    #[must_use]
    pub fn role_config(&self) -> RoleConfig {
        RoleConfig {
            default_roles: self.default_roles.clone(),
            admin_roles: self.admin_roles.clone(),
        }
    }
}

/// Default and admin roles are disjoint inputs.
///
/// # Errors
///
/// `OverlappingRoles` naming every role present in both sets.
pub fn check_disjoint_roles(
    default_roles: &BTreeSet<String>,
    admin_roles: &BTreeSet<String>,
) -> Result<(), ConfigError> {
    let overlap: Vec<&str> = default_roles
        .intersection(admin_roles)
        .map(String::as_str)
        .collect();
    if !overlap.is_empty() {
        return Err(ConfigError::OverlappingRoles {
            roles: overlap.join(", "),
        });
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GitlabRealmConfig::default();

        assert_eq!(cfg.realm_name, "gitlab-realm");
        assert_eq!(cfg.admin_gate, AdminGate::ActiveStatus);
        assert!(cfg.static_directory.users.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_from_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "realm.yaml",
                r#"
realm_name: "nexus-gitlab"
default_roles: ["nx-developer"]
admin_roles: ["nx-admin"]
admin_gate: directory_admin
static_directory:
  users:
    - token: "glpat-alice"
      record:
        id: 7
        username: "alice"
        state: "active"
"#,
            )?;

            let cfg = GitlabRealmConfig::load(Some(Path::new("realm.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(cfg.realm_name, "nexus-gitlab");
            assert!(cfg.default_roles.contains("nx-developer"));
            assert!(cfg.admin_roles.contains("nx-admin"));
            assert_eq!(cfg.admin_gate, AdminGate::DirectoryAdmin);

            let user = &cfg.static_directory.users[0];
            assert_eq!(user.token.expose_secret(), "glpat-alice");
            assert_eq!(user.record.id.as_deref(), Some("7"));
            assert_eq!(user.record.username, "alice");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("realm.yaml", "realm_name: from-file\n")?;
            jail.set_env("GITLAB_REALM_REALM_NAME", "from-env");
            jail.set_env("GITLAB_REALM_ADMIN_ROLES", r#"["nx-admin"]"#);

            let cfg = GitlabRealmConfig::load(Some(Path::new("realm.yaml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(cfg.realm_name, "from-env");
            assert!(cfg.admin_roles.contains("nx-admin"));
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("realm.yaml", "realm_nmae: typo\n")?;

            let result = GitlabRealmConfig::load(Some(Path::new("realm.yaml")));
            assert!(matches!(result, Err(ConfigError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn overlapping_roles_are_rejected() {
        let cfg = GitlabRealmConfig {
            default_roles: BTreeSet::from(["nx-developer".to_owned(), "nx-admin".to_owned()]),
            admin_roles: BTreeSet::from(["nx-admin".to_owned()]),
            ..GitlabRealmConfig::default()
        };

        match cfg.validate() {
            Err(ConfigError::OverlappingRoles { roles }) => assert_eq!(roles, "nx-admin"),
            other => panic!("Expected OverlappingRoles, got: {other:?}"),
        }
    }

    #[test]
    fn blank_realm_name_is_rejected() {
        let cfg = GitlabRealmConfig {
            realm_name: "  ".to_owned(),
            ..GitlabRealmConfig::default()
        };

        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyRealmName)));
    }
}
