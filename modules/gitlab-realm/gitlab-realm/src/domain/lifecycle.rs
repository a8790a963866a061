//! Activation flag of a realm instance.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::LOG_TARGET;

/// Activation state owned by whatever composes the realm.
///
/// Authentication and authorization never consult it; it exists for
/// operational visibility. Each instance is independent.
#[derive(Debug, Default)]
pub struct RealmLifecycle {
    active: AtomicBool,
}

impl RealmLifecycle {
    /// A new, inactive lifecycle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
        info!(target: LOG_TARGET, "Realm activated");
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        info!(target: LOG_TARGET, "Realm deactivated");
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn starts_inactive() {
        assert!(!RealmLifecycle::new().is_active());
    }

    #[test]
    fn activate_then_deactivate_round_trip() {
        let lifecycle = RealmLifecycle::new();

        lifecycle.activate();
        lifecycle.activate();
        assert!(lifecycle.is_active());

        lifecycle.deactivate();
        lifecycle.deactivate();
        assert!(!lifecycle.is_active());
    }

    #[test]
    fn instances_do_not_interfere() {
        let first = RealmLifecycle::new();
        let second = RealmLifecycle::new();

        first.activate();

        assert!(first.is_active());
        assert!(!second.is_active());
    }

    #[test]
    fn concurrent_toggles_settle_on_last_write() {
        let lifecycle = RealmLifecycle::new();

        thread::scope(|s| {
            for worker in 0..8 {
                let lifecycle = &lifecycle;
                s.spawn(move || {
                    for round in 0..500 {
                        if (worker + round) % 2 == 0 {
                            lifecycle.activate();
                        } else {
                            lifecycle.deactivate();
                        }
                    }
                });
            }
        });

        lifecycle.deactivate();
        assert!(!lifecycle.is_active());

        lifecycle.activate();
        assert!(lifecycle.is_active());
    }
}
