//! PostgreSQL account repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{AccountRow, SessionRow};
use crate::repo::{AccountRepository, NewAccount, NewSession};

/// PostgreSQL account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, is_active, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<AccountRow>> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, is_active, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create_with_session(
        &self,
        account: NewAccount,
        session: NewSession,
    ) -> DbResult<(AccountRow, SessionRow)> {
        // Scoped transaction: dropping `tx` without commit rolls everything
        // back, including on early return and caller cancellation.
        let mut tx = self.pool.begin().await?;

        let account_row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (id, email, password_hash, is_active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, email, password_hash, is_active, created_at, updated_at
            "#,
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (account_id)
            VALUES ($1)
            "#,
        )
        .bind(account.id)
        .execute(&mut *tx)
        .await?;

        let session_row = sqlx::query_as::<_, SessionRow>(
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
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((account_row, session_row))
    }

    async fn list(&self, offset: i64, limit: i64) -> DbResult<Vec<AccountRow>> {
        let accounts = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, is_active, created_at, updated_at
            FROM accounts
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn count(&self) -> DbResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        // profiles.account_id and sessions.account_id are ON DELETE CASCADE
        sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
