//! Mock repositories for testing
//!
//! In-memory implementations backed by one shared [`MockStore`], so the
//! account, profile, and session repositories observe a consistent world the
//! same way the Postgres implementations share one database. The email and
//! refresh-token indexes use DashMap entry semantics, which makes uniqueness
//! claims and refresh-token consumption atomic under concurrent callers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use passport_db::{
    AccountRepository, AccountRow, DbError, DbResult, NewAccount, NewSession, ProfileRepository,
    ProfileRow, SessionRepository, SessionRow, UpdateProfile,
};

/// Shared in-memory backing store
#[derive(Default)]
pub struct MockStore {
    accounts: DashMap<Uuid, AccountRow>,
    by_email: DashMap<String, Uuid>,
    profiles: DashMap<Uuid, ProfileRow>,
    sessions: DashMap<Uuid, SessionRow>,
    by_access_token: DashMap<String, Uuid>,
    by_refresh_token: DashMap<String, Uuid>,
    fail_session_insert: AtomicBool,
}

impl MockStore {
    /// Make the next registration fail while inserting the session row,
    /// after the account and profile writes have been issued.
    pub fn fail_session_insert(&self) {
        self.fail_session_insert.store(true, Ordering::SeqCst);
    }

    /// Number of stored sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of stored profiles
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    fn insert_session(&self, session: NewSession) -> SessionRow {
        let now = Utc::now();
        let row = SessionRow {
            id: session.id,
            account_id: session.account_id,
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            expires_in: session.expires_in,
            token_type: session.token_type,
            created_at: now,
            updated_at: now,
        };
        self.by_access_token.insert(session.access_token, session.id);
        self.by_refresh_token.insert(session.refresh_token, session.id);
        self.sessions.insert(session.id, row.clone());
        row
    }

    fn remove_session(&self, id: Uuid) -> Option<SessionRow> {
        let (_, row) = self.sessions.remove(&id)?;
        self.by_access_token.remove(&row.access_token);
        self.by_refresh_token.remove(&row.refresh_token);
        Some(row)
    }
}

/// In-memory account repository
#[derive(Clone)]
pub struct MockAccountRepository {
    store: Arc<MockStore>,
}

impl MockAccountRepository {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>> {
        Ok(self.store.accounts.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<AccountRow>> {
        Ok(self
            .store
            .by_email
            .get(email)
            .and_then(|id| self.store.accounts.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create_with_session(
        &self,
        account: NewAccount,
        session: NewSession,
    ) -> DbResult<(AccountRow, SessionRow)> {
        // Claim the email atomically; the loser of a duplicate race sees
        // Occupied and conflicts without writing anything.
        match self.store.by_email.entry(account.email.clone()) {
            Entry::Occupied(_) => return Err(DbError::Conflict),
            Entry::Vacant(v) => {
                v.insert(account.id);
            }
        }

        let now = Utc::now();
        let account_row = AccountRow {
            id: account.id,
            email: account.email.clone(),
            password_hash: account.password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.store.accounts.insert(account.id, account_row.clone());

        let profile_row = ProfileRow {
            account_id: account.id,
            full_name: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            avatar_url: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.store.profiles.insert(account.id, profile_row);

        // Simulated mid-transaction storage failure: roll back everything
        // written so far, matching the Postgres transaction contract.
        if self.store.fail_session_insert.swap(false, Ordering::SeqCst) {
            self.store.profiles.remove(&account.id);
            self.store.accounts.remove(&account.id);
            self.store.by_email.remove(&account.email);
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }

        let session_row = self.store.insert_session(session);

        Ok((account_row, session_row))
    }

    async fn list(&self, offset: i64, limit: i64) -> DbResult<Vec<AccountRow>> {
        let mut rows: Vec<AccountRow> = self
            .store
            .accounts
            .iter()
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> DbResult<i64> {
        Ok(self.store.accounts.len() as i64)
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        if let Some((_, account)) = self.store.accounts.remove(&id) {
            self.store.by_email.remove(&account.email);
            self.store.profiles.remove(&id);

            // Cascade to sessions, mirroring ON DELETE CASCADE
            let owned: Vec<Uuid> = self
                .store
                .sessions
                .iter()
                .filter(|r| r.value().account_id == id)
                .map(|r| r.value().id)
                .collect();
            for session_id in owned {
                self.store.remove_session(session_id);
            }
        }
        Ok(())
    }
}

/// In-memory profile repository
#[derive(Clone)]
pub struct MockProfileRepository {
    store: Arc<MockStore>,
}

impl MockProfileRepository {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_account_id(&self, account_id: Uuid) -> DbResult<Option<ProfileRow>> {
        Ok(self.store.profiles.get(&account_id).map(|r| r.value().clone()))
    }

    async fn update(
        &self,
        account_id: Uuid,
        update: UpdateProfile,
    ) -> DbResult<Option<ProfileRow>> {
        match self.store.profiles.get_mut(&account_id) {
            Some(mut profile) => {
                profile.full_name = update.full_name;
                profile.first_name = update.first_name;
                profile.last_name = update.last_name;
                profile.avatar_url = update.avatar_url;
                profile.updated_at = Utc::now();
                Ok(Some(profile.clone()))
            }
            None => Ok(None),
        }
    }
}

/// In-memory session repository
#[derive(Clone)]
pub struct MockSessionRepository {
    store: Arc<MockStore>,
}

impl MockSessionRepository {
    pub fn new(store: Arc<MockStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn find_by_access_token(&self, access_token: &str) -> DbResult<Option<SessionRow>> {
        Ok(self
            .store
            .by_access_token
            .get(access_token)
            .and_then(|id| self.store.sessions.get(id.value()).map(|r| r.value().clone())))
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> DbResult<Option<SessionRow>> {
        Ok(self
            .store
            .by_refresh_token
            .get(refresh_token)
            .and_then(|id| self.store.sessions.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, session: NewSession) -> DbResult<SessionRow> {
        Ok(self.store.insert_session(session))
    }

    async fn rotate(
        &self,
        refresh_token: &str,
        replacement: NewSession,
    ) -> DbResult<Option<SessionRow>> {
        // The remove is the consumption point: exactly one concurrent caller
        // gets Some for a given token.
        let Some((_, old_id)) = self.store.by_refresh_token.remove(refresh_token) else {
            return Ok(None);
        };

        if let Some((_, old)) = self.store.sessions.remove(&old_id) {
            self.store.by_access_token.remove(&old.access_token);
        }

        Ok(Some(self.store.insert_session(replacement)))
    }

    async fn delete_by_access_token(&self, access_token: &str) -> DbResult<u64> {
        // Copy the id out before touching the maps again; holding an index
        // guard across remove_session would deadlock on the same shard.
        let id = self.store.by_access_token.get(access_token).map(|r| *r.value());
        match id {
            Some(id) => Ok(self.store.remove_session(id).map(|_| 1).unwrap_or(0)),
            None => Ok(0),
        }
    }

    async fn delete_by_refresh_token(&self, refresh_token: &str) -> DbResult<u64> {
        let id = self.store.by_refresh_token.get(refresh_token).map(|r| *r.value());
        match id {
            Some(id) => Ok(self.store.remove_session(id).map(|_| 1).unwrap_or(0)),
            None => Ok(0),
        }
    }
}
