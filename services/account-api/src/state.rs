//! Application state

use std::ops::Deref;
use std::sync::Arc;

use passport_auth_core::AuthService;
use passport_db::pg::{
    PgAccountRepository, PgProfileRepository, PgSessionRepository, Repositories,
};
use passport_db::DbPool;

use crate::config::Config;

/// Type alias for the auth service with concrete repository types
pub type AuthServiceImpl =
    AuthService<PgAccountRepository, PgProfileRepository, PgSessionRepository>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Account and session authority
    pub auth: Arc<AuthServiceImpl>,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from a pool and configuration
    pub fn new(pool: DbPool, config: Config) -> Result<Self, passport_auth_core::AuthError> {
        let repos = Repositories::new(pool.clone());

        let auth = AuthService::new(
            config.auth.clone(),
            Arc::new(repos.accounts),
            Arc::new(repos.profiles),
            Arc::new(repos.sessions),
        )?;

        Ok(Self {
            auth: Arc::new(auth),
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        })
    }
}
