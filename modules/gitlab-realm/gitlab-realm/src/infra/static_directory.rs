//! In-memory directory backend for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use gitlab_realm_sdk::{DirectoryClient, DirectoryError, DirectoryRecord};
use secrecy::{ExposeSecret, SecretString};

use crate::config::{StaticDirectoryConfig, StaticUserConfig};

/// HTTP status GitLab answers with for a bad token.
const UNAUTHORIZED: u16 = 401;

/// Directory answering from configured users.
///
/// A lookup succeeds only when both the username and the token match;
/// anything else is reported like GitLab rejecting the token.
pub struct StaticDirectory {
    users: HashMap<String, StaticUserConfig>,
}

impl StaticDirectory {
    #[must_use]
    pub fn from_config(cfg: &StaticDirectoryConfig) -> Self {
        let users = cfg
            .users
            .iter()
            .map(|u| (u.record.username.clone(), u.clone()))
            .collect();

        Self { users }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl DirectoryClient for StaticDirectory {
    async fn lookup(
        &self,
        username: &str,
        secret: &SecretString,
    ) -> Result<DirectoryRecord, DirectoryError> {
        self.users
            .get(username)
            .filter(|u| u.token.expose_secret() == secret.expose_secret())
            .map(|u| u.record.clone())
            .ok_or(DirectoryError::Status {
                status: UNAUTHORIZED,
            })
    }
}
