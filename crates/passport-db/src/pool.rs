//! Connection pool setup

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Postgres pool shared by all repositories
pub type DbPool = PgPool;

/// Open a connection pool against the given Postgres URL.
///
/// All repositories clone this pool; sqlx pools are cheap handles over one
/// shared connection set.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}
