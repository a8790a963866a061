//! `Realm` implementation for the GitLab realm service.

use async_trait::async_trait;
use gitlab_realm_sdk::{AuthFailure, Credential, Principal, Realm, RoleSet};

use super::service::Service;

#[async_trait]
impl Realm for Service {
    fn name(&self) -> &str {
        self.realm_name()
    }

    async fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<Option<Principal>, AuthFailure> {
        Service::authenticate(self, credential).await
    }

    fn authorize(&self, principal: &Principal) -> Option<RoleSet> {
        Service::authorize(self, principal)
    }
}
