//! GitLab realm module.

use std::sync::{Arc, OnceLock};

use anyhow::Context;
use gitlab_realm_sdk::{DirectoryClient, Realm, RoleConfigProvider};
use tracing::{info, warn};

use crate::LOG_TARGET;
use crate::config::{GitlabRealmConfig, check_disjoint_roles};
use crate::domain::{RealmLifecycle, Service};
use crate::infra::{LiveRoleConfig, RoleConfig, StaticDirectory};

/// GitLab realm module.
///
/// Owns the realm service, the live role configuration and the activation
/// flag:
/// 1. `init` builds the service from configuration and activates the realm
/// 2. the host calls the returned [`Realm`] for every login attempt
/// 3. `stop` deactivates the realm
#[derive(Default)]
pub struct GitlabRealmModule {
    service: OnceLock<Arc<Service>>,
    roles: Arc<LiveRoleConfig>,
    lifecycle: RealmLifecycle,
}

impl GitlabRealmModule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the realm over `directory` and activate it.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the module was already
    /// initialized.
    pub fn init(
        &self,
        cfg: &GitlabRealmConfig,
        directory: Arc<dyn DirectoryClient>,
    ) -> anyhow::Result<Arc<dyn Realm>> {
        info!(
            target: LOG_TARGET,
            realm = %cfg.realm_name,
            admin_gate = ?cfg.admin_gate,
            default_roles = cfg.default_roles.len(),
            admin_roles = cfg.admin_roles.len(),
            "Initializing gitlab_realm"
        );

        cfg.validate().context("invalid gitlab_realm configuration")?;

        let roles: Arc<dyn RoleConfigProvider> = self.roles.clone();
        let service = Arc::new(Service::new(
            cfg.realm_name.clone(),
            directory,
            roles,
            cfg.admin_gate,
        ));
        self.service
            .set(service.clone())
            .map_err(|_| anyhow::anyhow!("Service already initialized"))?;

        self.roles.store(cfg.role_config());
        self.lifecycle.activate();

        info!(target: LOG_TARGET, realm = %cfg.realm_name, "GitLab realm initialized");
        Ok(service)
    }

    /// Build the realm over the configured static directory.
    ///
    /// # Errors
    ///
    /// Same as [`GitlabRealmModule::init`].
    pub fn init_with_static_directory(
        &self,
        cfg: &GitlabRealmConfig,
    ) -> anyhow::Result<Arc<dyn Realm>> {
        let directory = StaticDirectory::from_config(&cfg.static_directory);
        warn!(
            target: LOG_TARGET,
            users = directory.len(),
            "GitLab realm is backed by the static directory \
             (configured users only). Do NOT use this in production."
        );
        self.init(cfg, Arc::new(directory))
    }

    /// Deactivate the realm. The service stays usable for in-flight calls.
    pub fn stop(&self) {
        self.lifecycle.deactivate();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// The realm built by `init`, if any.
    #[must_use]
    pub fn realm(&self) -> Option<Arc<dyn Realm>> {
        self.service
            .get()
            .map(|service| Arc::clone(service) as Arc<dyn Realm>)
    }

    /// Swap the role configuration used by subsequent authorizations.
    ///
    /// # Errors
    ///
    /// Fails if a role is both a default and an admin role.
    pub fn reload_roles(&self, roles: RoleConfig) -> anyhow::Result<()> {
        check_disjoint_roles(&roles.default_roles, &roles.admin_roles)
            .context("invalid role configuration")?;

        info!(
            target: LOG_TARGET,
            default_roles = roles.default_roles.len(),
            admin_roles = roles.admin_roles.len(),
            "Reloading gitlab_realm roles"
        );
        self.roles.store(roles);
        Ok(())
    }
}
