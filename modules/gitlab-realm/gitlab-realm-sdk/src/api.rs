//! Traits at the seams of the GitLab realm.
//!
//! [`Realm`] is what the host security framework calls. [`DirectoryClient`]
//! and [`RoleConfigProvider`] are what the realm consumes.

use std::collections::BTreeSet;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::{AuthFailure, DirectoryError};
use crate::models::{Credential, DirectoryRecord, Principal, RoleSet};

/// Pluggable realm entry points expected by the host security framework.
///
/// ```ignore
/// let realm: Arc<dyn Realm> = module.init(cfg, directory)?;
///
/// if let Some(principal) = realm.authenticate(&credential).await? {
///     let groups = realm.authorize(&principal).unwrap_or_default();
/// }
/// ```
#[async_trait]
pub trait Realm: Send + Sync {
    /// Name of this realm. Principals it verifies carry this name as provenance.
    fn name(&self) -> &str;

    /// Exchange a credential for a verified principal.
    ///
    /// Returns `Ok(None)` when the realm abstains (empty secret), so the
    /// host can consult other realms.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCredentialKind` if the credential is not a username/secret pair
    /// - `DirectoryUnavailable` if the directory lookup failed for any reason
    /// - `UserDisabled` if the directory reports the account as not active
    /// - `IncompleteIdentity` if the directory record has no stable identifier
    async fn authenticate(&self, credential: &Credential)
    -> Result<Option<Principal>, AuthFailure>;

    /// Compute the roles granted to a principal verified by this realm.
    ///
    /// Returns `None` ("no opinion") for principals from other realms.
    fn authorize(&self, principal: &Principal) -> Option<RoleSet>;
}

/// Remote user-directory lookup.
///
/// Implementations own transport concerns (timeouts, retries, TLS). The
/// realm treats every error opaquely.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Look up the directory record of `username`, authenticating with `secret`.
    ///
    /// # Errors
    ///
    /// Any transport, protocol, status or parse failure.
    async fn lookup(
        &self,
        username: &str,
        secret: &SecretString,
    ) -> Result<DirectoryRecord, DirectoryError>;
}

/// Source of role configuration, read on every authorization call.
pub trait RoleConfigProvider: Send + Sync {
    /// Roles granted to every principal of the realm.
    fn default_roles(&self) -> BTreeSet<String>;

    /// Roles granted on top of the defaults to elevated principals.
    fn admin_roles(&self) -> BTreeSet<String>;
}
