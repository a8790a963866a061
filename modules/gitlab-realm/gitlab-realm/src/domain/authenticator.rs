//! Credential delegation to the directory.

use std::sync::Arc;

use gitlab_realm_sdk::{AuthFailure, Credential, DirectoryClient, Principal};
use secrecy::ExposeSecret;
use tracing::debug;

use super::mapper::to_identity;
use crate::LOG_TARGET;

/// Turns a credential into a verified [`Principal`] or a classified failure.
///
/// Holds no mutable state. Every call performs exactly one directory
/// lookup (none when it abstains or rejects the credential kind) and
/// reflects the directory as it is at that moment.
pub struct AuthenticationEngine {
    realm_name: String,
    directory: Arc<dyn DirectoryClient>,
}

impl AuthenticationEngine {
    #[must_use]
    pub fn new(realm_name: impl Into<String>, directory: Arc<dyn DirectoryClient>) -> Self {
        Self {
            realm_name: realm_name.into(),
            directory,
        }
    }

    /// Name stamped on the principals this engine produces.
    #[must_use]
    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }

    /// Authenticate a credential against the directory.
    ///
    /// Returns `Ok(None)` when the secret is empty: the realm abstains and
    /// the directory is not contacted.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCredentialKind` for anything but a username/secret pair
    /// - `DirectoryUnavailable` if the lookup fails, whatever the cause
    /// - `UserDisabled` if the account is not active
    /// - `IncompleteIdentity` if the record has no identifier
    pub async fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<Option<Principal>, AuthFailure> {
        let (username, secret) = match credential {
            Credential::UsernameSecret { username, secret } => (username, secret),
            Credential::Unsupported { kind } => {
                debug!(target: LOG_TARGET, kind = %kind, "credential kind is not supported");
                return Err(AuthFailure::UnsupportedCredentialKind { kind: kind.clone() });
            }
        };

        if secret.expose_secret().is_empty() {
            debug!(target: LOG_TARGET, username = %username, "token is empty");
            return Ok(None);
        }

        debug!(target: LOG_TARGET, username = %username, "authenticating");
        let record = self
            .directory
            .lookup(username, secret)
            .await
            .map_err(|e| {
                debug!(
                    target: LOG_TARGET,
                    username = %username,
                    error = %e,
                    "authentication failed: directory lookup failed"
                );
                AuthFailure::DirectoryUnavailable { source: e }
            })?;

        let identity = to_identity(&record);

        if !identity.is_active() {
            debug!(
                target: LOG_TARGET,
                username = %username,
                status = ?identity.status,
                "authentication failed: user is not active"
            );
            return Err(AuthFailure::UserDisabled {
                username: username.clone(),
            });
        }

        if identity.stable_id().is_none() {
            debug!(
                target: LOG_TARGET,
                username = %username,
                "authentication failed: directory record has no user id"
            );
            return Err(AuthFailure::IncompleteIdentity {
                username: username.clone(),
            });
        }

        debug!(
            target: LOG_TARGET,
            username = %username,
            user_id = identity.stable_id(),
            "successfully authenticated"
        );
        Ok(Some(Principal::new(
            identity,
            self.realm_name.clone(),
            secret.clone(),
        )))
    }
}
