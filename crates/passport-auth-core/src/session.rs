//! Session issuance and lifecycle
//!
//! A session is an issued access/refresh token pair owned by one account.
//! This module mints new pairs and drives the lifecycle transitions:
//! `Issued -> (Refreshed -> Issued)* -> Revoked | Expired`. Refresh is the
//! only transition that retires a token pair while keeping the account's
//! session alive, and refresh tokens are single-use: the store consumes the
//! old row and inserts the replacement atomically.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use passport_db::{NewSession, SessionRepository};
use passport_types::{AccountId, SessionView, TokenHint};

use crate::token::TokenCodec;
use crate::AuthError;

/// Token type constant for all issued sessions
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Mints token pairs and manages refresh, revocation, and validation.
#[derive(Clone)]
pub struct SessionIssuer<S: SessionRepository> {
    codec: TokenCodec,
    repo: Arc<S>,
}

impl<S: SessionRepository> SessionIssuer<S> {
    /// Create a new session issuer
    pub fn new(codec: TokenCodec, repo: Arc<S>) -> Self {
        Self { codec, repo }
    }

    /// Mint a token pair without persisting it.
    ///
    /// The returned [`NewSession`] is handed to the store by the caller; the
    /// registration flow inserts it inside the same transaction that creates
    /// the account. `expires_in` is derived from the access token's own
    /// expiry claim.
    pub fn mint(&self, account_id: AccountId) -> Result<(NewSession, SessionView), AuthError> {
        let now = Utc::now();
        let (access_token, claims) = self.codec.issue(account_id, now)?;
        let refresh_token = self.codec.mint_refresh_token();
        let expires_in = claims.expires_in(now);

        let session = NewSession {
            id: Uuid::new_v4(),
            account_id: account_id.0,
            access_token: access_token.clone(),
            refresh_token: refresh_token.clone(),
            expires_in,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        };

        let view = SessionView {
            access_token,
            refresh_token,
            expires_in,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        };

        Ok((session, view))
    }

    /// Mint and persist a new session for the account
    pub async fn issue(&self, account_id: AccountId) -> Result<SessionView, AuthError> {
        let (session, view) = self.mint(account_id)?;
        self.repo.create(session).await?;
        Ok(view)
    }

    /// Exchange a refresh token for a fresh pair, retiring the old one.
    ///
    /// Single-use: the store's rotate operation consumes the old row
    /// atomically, so of N concurrent submissions of the same refresh token
    /// exactly one succeeds; the rest fail with [`AuthError::InvalidToken`].
    pub async fn refresh(&self, refresh_token: &str) -> Result<SessionView, AuthError> {
        let current = self
            .repo
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let (replacement, view) = self.mint(current.account_id())?;

        match self.repo.rotate(refresh_token, replacement).await? {
            Some(_) => Ok(view),
            // Lost the race: another caller consumed the token between the
            // lookup and the rotate.
            None => Err(AuthError::InvalidToken),
        }
    }

    /// Delete the session matching the token under the given hint.
    ///
    /// Idempotent: revoking a token that matches nothing is a success.
    pub async fn revoke(&self, token: &str, hint: TokenHint) -> Result<(), AuthError> {
        let removed = match hint {
            TokenHint::AccessToken => self.repo.delete_by_access_token(token).await?,
            TokenHint::RefreshToken => self.repo.delete_by_refresh_token(token).await?,
        };

        if removed == 0 {
            tracing::debug!("Revoke matched no session");
        }

        Ok(())
    }

    /// Delete the session matching the access token; same idempotence as revoke
    pub async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        self.revoke(access_token, TokenHint::AccessToken).await
    }

    /// Verify signature and expiry, returning the embedded account id.
    ///
    /// Stateless by design: the session store is not consulted, so a revoked
    /// token stays valid until its natural expiry (exposure window = access
    /// TTL).
    pub fn validate(&self, access_token: &str) -> Result<AccountId, AuthError> {
        let claims = self.codec.parse(access_token)?;

        if claims.is_expired(Utc::now()) {
            return Err(AuthError::InvalidToken);
        }

        claims.account_id()
    }
}

impl<S: SessionRepository> std::fmt::Debug for SessionIssuer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
