//! Error types for the GitLab realm.

use thiserror::Error;

/// User-facing message for any failure to obtain a usable record from GitLab.
pub const DEFAULT_MESSAGE: &str = "Could not retrieve info from Gitlab.";

/// User-facing message for accounts GitLab reports as not active.
pub const DISABLED_USER_MESSAGE: &str = "User is disabled in Gitlab.";

/// Failures raised by a [`DirectoryClient`](crate::DirectoryClient).
///
/// The realm never inspects these beyond logging; all of them surface as
/// [`AuthFailure::DirectoryUnavailable`].
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory did not answer in time.
    #[error("directory request timed out")]
    Timeout,

    /// Connection-level failure (DNS, TLS, reset).
    #[error("directory transport error: {0}")]
    Transport(String),

    /// The directory answered with a non-success HTTP status.
    #[error("directory returned HTTP {status}")]
    Status { status: u16 },

    /// The directory answer could not be decoded.
    #[error("malformed directory response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for DirectoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Classification of an [`AuthFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailureKind {
    UnsupportedCredentialKind,
    DirectoryUnavailable,
    UserDisabled,
    IncompleteIdentity,
}

/// Authentication failure handed to the host security framework.
///
/// `Display` only ever renders the fixed user-facing messages. The
/// underlying directory cause is reachable through
/// [`std::error::Error::source`] for logs.
#[derive(Debug, Error)]
pub enum AuthFailure {
    /// The credential is not a username/secret pair.
    #[error("credential of kind '{kind}' is not supported; a username/secret pair is required")]
    UnsupportedCredentialKind { kind: String },

    /// The directory lookup failed (transport, status, parse or timeout).
    #[error("{}", DEFAULT_MESSAGE)]
    DirectoryUnavailable {
        #[source]
        source: DirectoryError,
    },

    /// The directory reports the account as inactive or in an unknown state.
    #[error("{} for {username}", DISABLED_USER_MESSAGE)]
    UserDisabled { username: String },

    /// The directory record has no identifier to key the principal on.
    #[error("{} for {username}", DEFAULT_MESSAGE)]
    IncompleteIdentity { username: String },
}

impl AuthFailure {
    /// Classification of this failure.
    #[must_use]
    pub const fn kind(&self) -> AuthFailureKind {
        match self {
            Self::UnsupportedCredentialKind { .. } => AuthFailureKind::UnsupportedCredentialKind,
            Self::DirectoryUnavailable { .. } => AuthFailureKind::DirectoryUnavailable,
            Self::UserDisabled { .. } => AuthFailureKind::UserDisabled,
            Self::IncompleteIdentity { .. } => AuthFailureKind::IncompleteIdentity,
        }
    }
}
