//! Role derivation for principals of this realm.

use std::sync::Arc;

use gitlab_realm_sdk::{Identity, Principal, RoleConfigProvider, RoleSet};
use tracing::debug;

use crate::LOG_TARGET;
use crate::config::AdminGate;

/// Computes the roles granted to a principal.
///
/// Role configuration is read from the provider on every call, so changes
/// apply to the next authorization without a restart.
pub struct AuthorizationPolicy {
    roles: Arc<dyn RoleConfigProvider>,
    admin_gate: AdminGate,
}

impl AuthorizationPolicy {
    #[must_use]
    pub fn new(roles: Arc<dyn RoleConfigProvider>, admin_gate: AdminGate) -> Self {
        Self { roles, admin_gate }
    }

    /// Roles for `principal`, or `None` ("no opinion") when the principal
    /// was not authenticated by `realm_name`.
    ///
    /// The result is a fresh set: default roles, plus admin roles when the
    /// admin gate opens for this identity.
    #[must_use]
    pub fn authorize(&self, principal: &Principal, realm_name: &str) -> Option<RoleSet> {
        let identity = principal.identity();

        if principal.realm() != realm_name {
            debug!(
                target: LOG_TARGET,
                username = %identity.username,
                principal_realm = principal.realm(),
                realm = realm_name,
                "principal belongs to another realm, no opinion"
            );
            return None;
        }

        debug!(target: LOG_TARGET, username = %identity.username, "authorizing");

        let mut groups = RoleSet::from(self.roles.default_roles());
        if self.is_elevated(identity) {
            groups.extend(self.roles.admin_roles());
        }

        debug!(
            target: LOG_TARGET,
            username = %identity.username,
            groups = %groups,
            "gitlab authorization to groups"
        );
        Some(groups)
    }

    fn is_elevated(&self, identity: &Identity) -> bool {
        match self.admin_gate {
            AdminGate::ActiveStatus => identity.is_active(),
            AdminGate::DirectoryAdmin => identity.is_admin,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use gitlab_realm_sdk::IdentityStatus;
    use tracing_test::traced_test;

    use super::*;
    use crate::infra::{LiveRoleConfig, RoleConfig};

    const REALM: &str = "gitlab-realm";

    fn live_roles() -> Arc<LiveRoleConfig> {
        Arc::new(LiveRoleConfig::new(RoleConfig {
            default_roles: ["user".to_owned()].into(),
            admin_roles: ["admin".to_owned()].into(),
        }))
    }

    fn policy(gate: AdminGate) -> AuthorizationPolicy {
        AuthorizationPolicy::new(live_roles(), gate)
    }

    fn principal(realm: &str, status: IdentityStatus, is_admin: bool) -> Principal {
        Principal::new(
            Identity {
                id: Some("u123".to_owned()),
                username: "alice".to_owned(),
                status,
                is_admin,
            },
            realm,
            "tok".to_owned().into(),
        )
    }

    fn roles(names: &[&str]) -> RoleSet {
        names.iter().copied().collect()
    }

    #[test]
    #[traced_test]
    fn foreign_principal_gets_no_opinion() {
        let policy = policy(AdminGate::ActiveStatus);

        for status in [IdentityStatus::Active, IdentityStatus::Inactive] {
            let p = principal("ldap-realm", status, true);
            assert_eq!(policy.authorize(&p, REALM), None);
        }
        assert!(logs_contain("no opinion"));
    }

    #[test]
    fn active_principal_gets_default_and_admin_roles() {
        let p = principal(REALM, IdentityStatus::Active, false);

        let groups = policy(AdminGate::ActiveStatus).authorize(&p, REALM);

        assert_eq!(groups, Some(roles(&["user", "admin"])));
    }

    #[test]
    fn inactive_principal_gets_default_roles_only() {
        let p = principal(REALM, IdentityStatus::Inactive, false);

        let groups = policy(AdminGate::ActiveStatus).authorize(&p, REALM);

        assert_eq!(groups, Some(roles(&["user"])));
    }

    #[test]
    fn directory_admin_gate_uses_admin_flag() {
        let policy = policy(AdminGate::DirectoryAdmin);

        let admin = principal(REALM, IdentityStatus::Active, true);
        let developer = principal(REALM, IdentityStatus::Active, false);

        assert_eq!(
            policy.authorize(&admin, REALM),
            Some(roles(&["user", "admin"]))
        );
        assert_eq!(policy.authorize(&developer, REALM), Some(roles(&["user"])));
    }

    #[test]
    fn returned_set_is_detached_from_configuration() {
        let live = live_roles();
        let policy = AuthorizationPolicy::new(live.clone(), AdminGate::ActiveStatus);
        let p = principal(REALM, IdentityStatus::Active, false);

        let mut groups = policy.authorize(&p, REALM).unwrap();
        groups.insert("intruder");

        assert!(!live.default_roles().contains("intruder"));
        assert_eq!(policy.authorize(&p, REALM), Some(roles(&["user", "admin"])));
    }

    #[test]
    fn configuration_changes_apply_to_next_call() {
        let live = live_roles();
        let policy = AuthorizationPolicy::new(live.clone(), AdminGate::ActiveStatus);
        let p = principal(REALM, IdentityStatus::Active, false);

        live.store(RoleConfig {
            default_roles: ["viewer".to_owned()].into(),
            admin_roles: ["ops".to_owned()].into(),
        });

        assert_eq!(policy.authorize(&p, REALM), Some(roles(&["viewer", "ops"])));
    }

    #[test]
    #[traced_test]
    fn groups_are_logged_joined() {
        let p = principal(REALM, IdentityStatus::Active, false);

        let groups = policy(AdminGate::ActiveStatus).authorize(&p, REALM);

        assert!(groups.is_some());
        assert!(logs_contain("groups=admin, user"));
    }
}
