//! Auth service - ties together registration, login, and session lifecycle

use std::sync::Arc;

use passport_db::{
    AccountRepository, NewAccount, ProfileRepository, SessionRepository, UpdateProfile,
};
use passport_types::{Account, AccountId, Profile, ProfileUpdate, SessionView, TokenHint};

use crate::{
    config::AuthConfig, password::CredentialHasher, session::SessionIssuer, token::TokenCodec,
    AuthError,
};

/// Account plus its profile, as returned by account reads
#[derive(Debug, Clone)]
pub struct AccountDetail {
    pub account: Account,
    pub profile: Profile,
}

/// A page of accounts plus the total count across all pages
#[derive(Debug, Clone)]
pub struct AccountPage {
    pub accounts: Vec<AccountDetail>,
    pub total_count: i64,
}

/// Authentication service
///
/// Provides the unified account-authority interface:
/// - Atomic account + profile + session provisioning
/// - Credential verification and session issuance
/// - Token refresh, revocation, and validation
/// - Account and profile reads, updates, and deletes
pub struct AuthService<A, P, S>
where
    A: AccountRepository,
    P: ProfileRepository,
    S: SessionRepository,
{
    config: AuthConfig,
    hasher: CredentialHasher,
    sessions: SessionIssuer<S>,
    accounts: Arc<A>,
    profiles: Arc<P>,
}

impl<A, P, S> AuthService<A, P, S>
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    S: SessionRepository + 'static,
{
    /// Create a new auth service
    pub fn new(
        config: AuthConfig,
        accounts: Arc<A>,
        profiles: Arc<P>,
        session_repo: Arc<S>,
    ) -> Result<Self, AuthError> {
        let hasher = CredentialHasher::new(&config)?;
        let codec = TokenCodec::new(&config);

        Ok(Self {
            hasher,
            sessions: SessionIssuer::new(codec, session_repo),
            accounts,
            profiles,
            config,
        })
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new account and return its initial session.
    ///
    /// The account, its empty profile, and the first session become visible
    /// as a single unit or not at all. Email uniqueness is enforced by the
    /// store's insert constraint alone; a concurrent duplicate registration
    /// loses with [`AuthError::DuplicateAccount`] and leaves no rows behind.
    pub async fn register(&self, email: &str, password: &str) -> Result<SessionView, AuthError> {
        let email = normalize_email(email)?;
        self.check_password_strength(password)?;

        let password_hash = self.hash_password(password.to_string()).await?;

        // Sign the token pair before any row is written: a signing failure
        // here leaves nothing to roll back.
        let account_id = AccountId::new();
        let (session, view) = self.sessions.mint(account_id)?;

        let account = NewAccount {
            id: account_id.0,
            email,
            password_hash,
        };

        match self.accounts.create_with_session(account, session).await {
            Ok(_) => Ok(view),
            Err(passport_db::DbError::Conflict) => Err(AuthError::DuplicateAccount),
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Verify credentials and issue a new session.
    ///
    /// Prior sessions stay valid: concurrent sessions per account are
    /// allowed by design. Lookup and verification failures are distinct
    /// (`AccountNotFound` vs `InvalidCredentials`), matching the upstream
    /// contract; see DESIGN.md for the enumeration trade-off.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionView, AuthError> {
        let email = normalize_email(email)?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let matches = self
            .verify_password(password.to_string(), account.password_hash.clone())
            .await?;

        if !matches || !account.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        self.sessions.issue(account.account_id()).await
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Exchange a refresh token for a fresh pair (single-use rotation)
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<SessionView, AuthError> {
        self.sessions.refresh(refresh_token).await
    }

    /// Revoke the session matching the token under the given hint (idempotent)
    pub async fn revoke_token(&self, token: &str, hint: TokenHint) -> Result<(), AuthError> {
        self.sessions.revoke(token, hint).await
    }

    /// Delete the session matching the access token (idempotent)
    pub async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        self.sessions.logout(access_token).await
    }

    /// Verify signature and expiry, returning the embedded account id
    pub fn validate_token(&self, access_token: &str) -> Result<AccountId, AuthError> {
        self.sessions.validate(access_token)
    }

    // =========================================================================
    // Accounts and Profiles
    // =========================================================================

    /// Get an account with its profile
    pub async fn get_account(&self, account_id: AccountId) -> Result<AccountDetail, AuthError> {
        let account = self
            .accounts
            .find_by_id(account_id.0)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let profile = self
            .profiles
            .find_by_account_id(account_id.0)
            .await?
            .ok_or_else(|| {
                tracing::error!("Account {} has no profile row", account_id);
                AuthError::Internal("profile missing for account".to_string())
            })?;

        Ok(AccountDetail {
            account: account.to_account(),
            profile: profile.to_profile(),
        })
    }

    /// List accounts with offset pagination (1-indexed pages)
    pub async fn list_accounts(&self, page: u32, page_size: u32) -> Result<AccountPage, AuthError> {
        if page == 0 || page_size == 0 {
            return Err(AuthError::InvalidArgument(
                "page and page_size must be positive".to_string(),
            ));
        }

        let offset = i64::from(page - 1) * i64::from(page_size);
        let total_count = self.accounts.count().await?;
        let rows = self.accounts.list(offset, i64::from(page_size)).await?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            let profile = self
                .profiles
                .find_by_account_id(row.id)
                .await?
                .ok_or_else(|| {
                    tracing::error!("Account {} has no profile row", row.id);
                    AuthError::Internal("profile missing for account".to_string())
                })?;

            accounts.push(AccountDetail {
                account: row.to_account(),
                profile: profile.to_profile(),
            });
        }

        Ok(AccountPage {
            accounts,
            total_count,
        })
    }

    /// Delete an account; its profile and sessions cascade with it
    pub async fn delete_account(&self, account_id: AccountId) -> Result<(), AuthError> {
        self.accounts.delete(account_id.0).await?;
        Ok(())
    }

    /// Get the profile for an account
    pub async fn get_profile(&self, account_id: AccountId) -> Result<Profile, AuthError> {
        let profile = self
            .profiles
            .find_by_account_id(account_id.0)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        Ok(profile.to_profile())
    }

    /// Update the profile for an account
    pub async fn update_profile(
        &self,
        account_id: AccountId,
        update: ProfileUpdate,
    ) -> Result<Profile, AuthError> {
        let update = UpdateProfile {
            full_name: update.full_name,
            first_name: update.first_name,
            last_name: update.last_name,
            avatar_url: update.avatar_url,
        };

        let profile = self
            .profiles
            .update(account_id.0, update)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        Ok(profile.to_profile())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn check_password_strength(&self, password: &str) -> Result<(), AuthError> {
        if password.len() < self.config.min_password_len {
            return Err(AuthError::InvalidArgument(format!(
                "password must be at least {} characters",
                self.config.min_password_len
            )));
        }
        Ok(())
    }

    /// Run the Argon2 hash off the async executor; it is CPU-expensive by
    /// design and must not stall unrelated requests.
    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|_| AuthError::Internal("hashing task panicked".to_string()))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|_| AuthError::Internal("verification task panicked".to_string()))?
    }
}

impl<A, P, S> std::fmt::Debug for AuthService<A, P, S>
where
    A: AccountRepository,
    P: ProfileRepository,
    S: SessionRepository,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

/// Normalize and validate an email address.
///
/// Emails are case-insensitive in this system: they are trimmed and
/// ASCII-lowercased before every read or write, so the store's unique index
/// sees one canonical form.
fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_ascii_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };

    if !valid {
        return Err(AuthError::InvalidArgument("invalid email address".to_string()));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" A@X.com ").unwrap(), "a@x.com");
        assert_eq!(normalize_email("a@x.com").unwrap(), "a@x.com");

        for bad in ["", "no-at-sign", "@x.com", "a@", "a@b@c"] {
            assert!(normalize_email(bad).is_err(), "{bad:?} should be rejected");
        }
    }
}
