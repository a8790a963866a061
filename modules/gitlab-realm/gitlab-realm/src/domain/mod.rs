//! Domain layer for the GitLab realm.

pub mod authenticator;
mod client;
pub mod lifecycle;
pub mod mapper;
pub mod policy;
pub mod service;

pub use authenticator::AuthenticationEngine;
pub use lifecycle::RealmLifecycle;
pub use mapper::{parse_status, to_identity};
pub use policy::AuthorizationPolicy;
pub use service::Service;
