//! Shared test helpers

pub mod mock_repos;

use std::sync::Arc;

use passport_auth_core::{AuthConfig, AuthService};

use self::mock_repos::{
    MockAccountRepository, MockProfileRepository, MockSessionRepository, MockStore,
};

pub type TestService =
    AuthService<MockAccountRepository, MockProfileRepository, MockSessionRepository>;

/// Build an auth service over a fresh in-memory store.
///
/// Uses a light Argon2 work factor so credential tests stay fast.
pub fn test_service() -> (TestService, Arc<MockStore>) {
    let store = Arc::new(MockStore::default());

    let config = AuthConfig::try_new("test-secret-that-is-long-enough!!", "v1")
        .expect("test secret is valid")
        .with_argon2_params(8, 1, 1);

    let service = AuthService::new(
        config,
        Arc::new(MockAccountRepository::new(Arc::clone(&store))),
        Arc::new(MockProfileRepository::new(Arc::clone(&store))),
        Arc::new(MockSessionRepository::new(Arc::clone(&store))),
    )
    .expect("test config is valid");

    (service, store)
}
