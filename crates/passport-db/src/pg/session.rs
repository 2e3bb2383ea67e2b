//! PostgreSQL session repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::SessionRow;
use crate::repo::{NewSession, SessionRepository};

/// PostgreSQL session repository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_by_access_token(&self, access_token: &str) -> DbResult<Option<SessionRow>> {
        let session = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, account_id, access_token, refresh_token, expires_in, token_type,
                   created_at, updated_at
            FROM sessions
            WHERE access_token = $1
            "#,
        )
        .bind(access_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> DbResult<Option<SessionRow>> {
        let session = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, account_id, access_token, refresh_token, expires_in, token_type,
                   created_at, updated_at
            FROM sessions
            WHERE refresh_token = $1
            "#,
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    async fn create(&self, session: NewSession) -> DbResult<SessionRow> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (id, account_id, access_token, refresh_token, expires_in, token_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, account_id, access_token, refresh_token, expires_in, token_type,
                      created_at, updated_at
            "#,
        )
        .bind(session.id)
        .bind(session.account_id)
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .bind(session.expires_in)
        .bind(&session.token_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn rotate(
        &self,
        refresh_token: &str,
        replacement: NewSession,
    ) -> DbResult<Option<SessionRow>> {
        let mut tx = self.pool.begin().await?;

        // The DELETE is the linearization point: under concurrent duplicate
        // submissions of one refresh token, exactly one transaction deletes
        // the row; the rest see zero rows and bail without inserting.
        let deleted = sqlx::query("DELETE FROM sessions WHERE refresh_token = $1")
            .bind(refresh_token)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (id, account_id, access_token, refresh_token, expires_in, token_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, account_id, access_token, refresh_token, expires_in, token_type,
                      created_at, updated_at
            "#,
        )
        .bind(replacement.id)
        .bind(replacement.account_id)
        .bind(&replacement.access_token)
        .bind(&replacement.refresh_token)
        .bind(replacement.expires_in)
        .bind(&replacement.token_type)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(row))
    }

    async fn delete_by_access_token(&self, access_token: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE access_token = $1")
            .bind(access_token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_refresh_token(&self, refresh_token: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE refresh_token = $1")
            .bind(refresh_token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
