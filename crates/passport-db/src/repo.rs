//! Repository traits
//!
//! Define async repository interfaces for database operations.
//!
//! Two operations carry transactional contracts that implementations must
//! honor:
//! - [`AccountRepository::create_with_session`] inserts the account, its
//!   empty profile, and the initial session all-or-nothing.
//! - [`SessionRepository::rotate`] consumes the row matching a refresh token
//!   and inserts its replacement atomically, so a given refresh token can be
//!   consumed by at most one concurrent caller.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// Account repository trait
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>>;

    /// Find an account by (normalized) email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<AccountRow>>;

    /// Create an account, its empty profile, and the initial session in a
    /// single transaction.
    ///
    /// Email uniqueness is enforced by the insert constraint alone; a
    /// violation surfaces as [`crate::DbError::Conflict`] and leaves no rows
    /// behind.
    async fn create_with_session(
        &self,
        account: NewAccount,
        session: NewSession,
    ) -> DbResult<(AccountRow, SessionRow)>;

    /// List accounts ordered by creation time, newest first
    async fn list(&self, offset: i64, limit: i64) -> DbResult<Vec<AccountRow>>;

    /// Total number of accounts
    async fn count(&self) -> DbResult<i64>;

    /// Delete an account; the profile and all sessions owned by it cascade
    async fn delete(&self, id: Uuid) -> DbResult<()>;
}

/// Create account input
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Profile repository trait
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by its owning account
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Option<ProfileRow>>;

    /// Replace the profile fields for an account
    async fn update(&self, account_id: Uuid, update: UpdateProfile) -> DbResult<Option<ProfileRow>>;
}

/// Profile update input
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by access-token value
    async fn find_by_access_token(&self, access_token: &str) -> DbResult<Option<SessionRow>>;

    /// Find a session by refresh-token value
    async fn find_by_refresh_token(&self, refresh_token: &str) -> DbResult<Option<SessionRow>>;

    /// Create a new session
    async fn create(&self, session: NewSession) -> DbResult<SessionRow>;

    /// Atomically consume the session matching `refresh_token` and insert
    /// `replacement` in its place.
    ///
    /// Returns the new row, or `None` when the refresh token matched nothing
    /// (already consumed, revoked, or never issued). Implementations must
    /// guarantee that exactly one of N concurrent callers passing the same
    /// token observes `Some`.
    async fn rotate(
        &self,
        refresh_token: &str,
        replacement: NewSession,
    ) -> DbResult<Option<SessionRow>>;

    /// Delete the session matching an access-token value; returns rows removed
    async fn delete_by_access_token(&self, access_token: &str) -> DbResult<u64>;

    /// Delete the session matching a refresh-token value; returns rows removed
    async fn delete_by_refresh_token(&self, refresh_token: &str) -> DbResult<u64>;
}

/// Create session input
#[derive(Debug, Clone)]
pub struct NewSession {
    pub id: Uuid,
    pub account_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}
