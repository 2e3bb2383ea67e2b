//! PostgreSQL profile repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::ProfileRow;
use crate::repo::{ProfileRepository, UpdateProfile};

/// PostgreSQL profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Option<ProfileRow>> {
        let profile = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT account_id, full_name, first_name, last_name, avatar_url,
                   created_at, updated_at
            FROM profiles
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn update(
        &self,
        account_id: Uuid,
        update: UpdateProfile,
    ) -> DbResult<Option<ProfileRow>> {
        let profile = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE profiles
            SET full_name = $1, first_name = $2, last_name = $3, avatar_url = $4,
                updated_at = NOW()
            WHERE account_id = $5
            RETURNING account_id, full_name, first_name, last_name, avatar_url,
                      created_at, updated_at
            "#,
        )
        .bind(&update.full_name)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.avatar_url)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
