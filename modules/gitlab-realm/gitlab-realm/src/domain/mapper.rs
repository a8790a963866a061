//! Directory record to identity mapping.

use gitlab_realm_sdk::{DirectoryRecord, Identity, IdentityStatus};

/// GitLab `state` values meaning the account cannot sign in.
const INACTIVE_STATES: &[&str] = &[
    "blocked",
    "deactivated",
    "banned",
    "ldap_blocked",
    "blocked_pending_approval",
];

/// Normalize a directory record.
#[must_use]
pub fn to_identity(record: &DirectoryRecord) -> Identity {
    Identity {
        id: record.id.clone(),
        username: record.username.clone(),
        status: parse_status(record.state.as_deref()),
        is_admin: record.is_admin.unwrap_or(false),
    }
}

/// Map the provider status vocabulary to [`IdentityStatus`].
///
/// Anything not recognized, including a missing state, is `Unknown`.
#[must_use]
pub fn parse_status(state: Option<&str>) -> IdentityStatus {
    let Some(state) = state.map(str::trim) else {
        return IdentityStatus::Unknown;
    };

    if state.eq_ignore_ascii_case("active") {
        IdentityStatus::Active
    } else if INACTIVE_STATES
        .iter()
        .any(|inactive| state.eq_ignore_ascii_case(inactive))
    {
        IdentityStatus::Inactive
    } else {
        IdentityStatus::Unknown
    }
}
