//! Domain models for the GitLab realm.

use std::collections::BTreeSet;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

/// Credential presented by the host for one login attempt.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Username plus a password or personal access token.
    UsernameSecret {
        username: String,
        /// Wrapped in `SecretString` so `Debug` redacts the value.
        secret: SecretString,
    },
    /// Any other credential kind the host may route to this realm
    /// (bearer token, certificate, ...). `kind` names it for diagnostics.
    Unsupported { kind: String },
}

impl Credential {
    /// Build a username/secret credential.
    #[must_use]
    pub fn username_secret(username: impl Into<String>, secret: impl Into<SecretString>) -> Self {
        Self::UsernameSecret {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Build a marker for a credential kind this realm does not understand.
    #[must_use]
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported { kind: kind.into() }
    }

    /// Human-readable name of the credential kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::UsernameSecret { .. } => "username_secret",
            Self::Unsupported { kind } => kind,
        }
    }
}

/// Raw user record as returned by the directory (GitLab `GET /user`).
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Stable user identifier. GitLab sends a number; strings are accepted too.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    pub username: String,

    /// Provider status vocabulary (`active`, `blocked`, ...).
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub is_admin: Option<bool>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(
        Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }),
    )
}

/// Normalized account status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IdentityStatus {
    Active,
    Inactive,
    /// Status missing or not recognized. Never treated as active.
    #[default]
    Unknown,
}

/// Normalized identity derived from a [`DirectoryRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: Option<String>,
    pub username: String,
    pub status: IdentityStatus,
    /// Directory-side administrator flag (`false` when not reported).
    #[serde(default)]
    pub is_admin: bool,
}

impl Identity {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == IdentityStatus::Active
    }

    /// Identifier, if present and non-empty.
    #[must_use]
    pub fn stable_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// A verified identity plus the realm that vouched for it.
///
/// Carries the original secret as proof of authentication; the host decides
/// how long to cache it.
#[derive(Debug, Clone)]
pub struct Principal {
    identity: Identity,
    realm: String,
    proof: SecretString,
}

impl Principal {
    #[must_use]
    pub fn new(identity: Identity, realm: impl Into<String>, proof: SecretString) -> Self {
        Self {
            identity,
            realm: realm.into(),
            proof,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Name of the realm that authenticated this principal.
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    #[must_use]
    pub fn proof(&self) -> &SecretString {
        &self.proof
    }
}

/// Set of role (group) names granted to a principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the role was not present yet.
    pub fn insert(&mut self, role: impl Into<String>) -> bool {
        self.0.insert(role.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeSet<String> {
        self.0
    }
}

impl From<BTreeSet<String>> for RoleSet {
    fn from(roles: BTreeSet<String>) -> Self {
        Self(roles)
    }
}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for RoleSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for RoleSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Renders the roles joined by `", "`.
impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, role) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role)?;
        }
        Ok(())
    }
}
