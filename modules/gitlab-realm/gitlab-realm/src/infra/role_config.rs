//! Live role configuration backed by `ArcSwap`.

use std::collections::BTreeSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use gitlab_realm_sdk::RoleConfigProvider;

/// Snapshot of the role configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleConfig {
    pub default_roles: BTreeSet<String>,
    pub admin_roles: BTreeSet<String>,
}

/// Lock-free, hot-swappable role configuration.
///
/// Readers always see a complete snapshot; `store` never blocks them.
#[derive(Debug)]
pub struct LiveRoleConfig {
    current: ArcSwap<RoleConfig>,
}

impl LiveRoleConfig {
    #[must_use]
    pub fn new(initial: RoleConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Replace the role configuration seen by subsequent reads.
    pub fn store(&self, roles: RoleConfig) {
        self.current.store(Arc::new(roles));
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RoleConfig> {
        self.current.load_full()
    }
}

impl Default for LiveRoleConfig {
    fn default() -> Self {
        Self::new(RoleConfig::default())
    }
}

impl RoleConfigProvider for LiveRoleConfig {
    fn default_roles(&self) -> BTreeSet<String> {
        self.current.load().default_roles.clone()
    }

    fn admin_roles(&self) -> BTreeSet<String> {
        self.current.load().admin_roles.clone()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn roles(default: &[&str], admin: &[&str]) -> RoleConfig {
        RoleConfig {
            default_roles: default.iter().map(|r| (*r).to_owned()).collect(),
            admin_roles: admin.iter().map(|r| (*r).to_owned()).collect(),
        }
    }

    #[test]
    fn reads_reflect_latest_store() {
        let live = LiveRoleConfig::new(roles(&["user"], &["admin"]));
        assert!(live.default_roles().contains("user"));

        live.store(roles(&["viewer"], &[]));

        assert!(live.default_roles().contains("viewer"));
        assert!(!live.default_roles().contains("user"));
        assert!(live.admin_roles().is_empty());
    }

    #[test]
    fn returned_sets_are_owned_copies() {
        let live = LiveRoleConfig::new(roles(&["user"], &["admin"]));

        let mut copy = live.default_roles();
        copy.insert("intruder".to_owned());

        assert_eq!(live.snapshot().default_roles.len(), 1);
        assert!(!live.default_roles().contains("intruder"));
    }
}
