//! Realm service composing authentication and authorization.

use std::sync::Arc;

use gitlab_realm_sdk::{
    AuthFailure, Credential, DirectoryClient, Principal, RoleConfigProvider, RoleSet,
};

use super::authenticator::AuthenticationEngine;
use super::policy::AuthorizationPolicy;
use crate::config::AdminGate;

/// GitLab realm service.
///
/// Stateless apart from read-only collaborators, so one instance serves
/// concurrent login attempts.
pub struct Service {
    engine: AuthenticationEngine,
    policy: AuthorizationPolicy,
}

impl Service {
    #[must_use]
    pub fn new(
        realm_name: impl Into<String>,
        directory: Arc<dyn DirectoryClient>,
        roles: Arc<dyn RoleConfigProvider>,
        admin_gate: AdminGate,
    ) -> Self {
        Self {
            engine: AuthenticationEngine::new(realm_name, directory),
            policy: AuthorizationPolicy::new(roles, admin_gate),
        }
    }

    #[must_use]
    pub fn realm_name(&self) -> &str {
        self.engine.realm_name()
    }

    /// See [`AuthenticationEngine::authenticate`].
    ///
    /// # Errors
    ///
    /// Any [`AuthFailure`] raised by the engine.
    pub async fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<Option<Principal>, AuthFailure> {
        self.engine.authenticate(credential).await
    }

    /// Roles for a principal, judged against this realm's name.
    #[must_use]
    pub fn authorize(&self, principal: &Principal) -> Option<RoleSet> {
        self.policy.authorize(principal, self.realm_name())
    }
}
