//! PostgreSQL repository implementations

mod account;
mod profile;
mod session;

pub use account::PgAccountRepository;
pub use profile::PgProfileRepository;
pub use session::PgSessionRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub accounts: PgAccountRepository,
    pub profiles: PgProfileRepository,
    pub sessions: PgSessionRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            accounts: PgAccountRepository::new(pool.clone()),
            profiles: PgProfileRepository::new(pool.clone()),
            sessions: PgSessionRepository::new(pool),
        }
    }
}
