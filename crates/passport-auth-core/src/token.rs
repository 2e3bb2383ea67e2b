//! Access-token signing and parsing
//!
//! Access tokens are compact HS256 JWTs carrying the account id and expiry.
//! The codec is built from explicit key material; verification can accept
//! tokens signed by retired keys (matched by the `kid` header) so a secret
//! rotation does not instantly invalidate every outstanding session.
//!
//! Signature verification and expiry checking are deliberately separate
//! steps: expiry is always compared against a caller-supplied clock, which
//! keeps the codec deterministic under test and lets callers apply distinct
//! expiry policies.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use passport_types::AccountId;

use crate::{AuthConfig, AuthError};

/// Number of random bytes in a refresh token
const REFRESH_TOKEN_BYTES: usize = 32;

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (account id)
    pub sub: String,
    /// Unique token id. Timestamps have one-second resolution, so without
    /// this two tokens minted for the same account in the same second would
    /// be byte-identical; token values must be globally unique.
    pub jti: String,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

impl AccessClaims {
    /// Check expiry against a caller-supplied clock
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Seconds until expiry, derived from the embedded claim (never negative)
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.exp - now.timestamp()).max(0)
    }

    /// Get the account id from the subject claim
    pub fn account_id(&self) -> Result<AccountId, AuthError> {
        AccountId::parse(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

/// Signs and parses access tokens; mints refresh tokens.
#[derive(Clone)]
pub struct TokenCodec {
    key_id: String,
    encoding: EncodingKey,
    /// Accepted verification keys by key id. Always contains the signing
    /// key; rotation adds retired keys alongside it.
    decoding: HashMap<String, DecodingKey>,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec signing with the configured secret and key id
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.token_secret.as_bytes();
        let mut decoding = HashMap::new();
        decoding.insert(config.token_key_id.clone(), DecodingKey::from_secret(secret));

        Self {
            key_id: config.token_key_id.clone(),
            encoding: EncodingKey::from_secret(secret),
            decoding,
            ttl: config.access_token_ttl,
        }
    }

    /// Accept tokens signed by a retired key during a rotation window
    pub fn with_verification_key(mut self, key_id: impl Into<String>, secret: &[u8]) -> Self {
        self.decoding
            .insert(key_id.into(), DecodingKey::from_secret(secret));
        self
    }

    /// Access token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign an access token for the account, expiring at `now` + TTL
    pub fn issue(&self, account_id: AccountId, now: DateTime<Utc>) -> Result<(String, AccessClaims), AuthError> {
        let claims = AccessClaims {
            sub: account_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.ttl.as_secs() as i64,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.key_id.clone());

        let token = encode(&header, &claims, &self.encoding).map_err(|e| {
            tracing::error!("Token signing failed: {}", e);
            AuthError::Internal("token signing failed".to_string())
        })?;

        Ok((token, claims))
    }

    /// Verify signature and structure; expiry is NOT checked here.
    ///
    /// Fails with [`AuthError::InvalidToken`] on signature mismatch,
    /// malformed structure, unknown key id, or missing required claims.
    pub fn parse(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;

        // Tokens without a kid are verified against the current signing key.
        let kid = header.kid.as_deref().unwrap_or(&self.key_id);
        let key = self.decoding.get(kid).ok_or(AuthError::InvalidToken)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let data = decode::<AccessClaims>(token, key, &validation).map_err(|e| {
            tracing::debug!("Token parse failed: {}", e);
            AuthError::InvalidToken
        })?;

        Ok(data.claims)
    }

    /// Mint an unguessable refresh token (256 bits of OS randomness)
    pub fn mint_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key_id", &self.key_id)
            .field("accepted_key_ids", &self.decoding.keys().collect::<Vec<_>>())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec_with_secret(secret: &str) -> TokenCodec {
        let config = AuthConfig::try_new(secret.repeat(32), "v1").unwrap();
        TokenCodec::new(&config)
    }

    #[test]
    fn test_issue_parse_roundtrip() {
        let codec = codec_with_secret("a");
        let account_id = AccountId::new();
        let now = Utc::now();

        let (token, claims) = codec.issue(account_id, now).unwrap();
        assert_eq!(claims.expires_in(now), 3600);

        let parsed = codec.parse(&token).unwrap();
        assert_eq!(parsed.account_id().unwrap(), account_id);
        assert_eq!(parsed.exp, now.timestamp() + 3600);
        assert!(!parsed.is_expired(now));
    }

    #[test]
    fn test_tokens_unique_within_one_second() {
        let codec = codec_with_secret("a");
        let account_id = AccountId::new();
        let now = Utc::now();

        // Same account, same clock reading: the jti claim must still make
        // the token values distinct.
        let (a, claims_a) = codec.issue(account_id, now).unwrap();
        let (b, claims_b) = codec.issue(account_id, now).unwrap();

        assert_ne!(a, b);
        assert_ne!(claims_a.jti, claims_b.jti);
    }

    #[test]
    fn test_expiry_uses_caller_clock() {
        let codec = codec_with_secret("a");
        let now = Utc::now();
        let (token, _) = codec.issue(AccountId::new(), now).unwrap();

        // Parsing succeeds even after expiry; the expiry check is separate.
        let claims = codec.parse(&token).unwrap();
        let after_ttl = now + chrono::Duration::seconds(3601);
        assert!(claims.is_expired(after_ttl));
        assert_eq!(claims.expires_in(after_ttl), 0);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let codec = codec_with_secret("a");
        let (token, _) = codec.issue(AccountId::new(), Utc::now()).unwrap();

        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(codec.parse(&tampered), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = codec_with_secret("a");
        let verifier = codec_with_secret("b");

        let (token, _) = signer.issue(AccountId::new(), Utc::now()).unwrap();
        assert!(matches!(verifier.parse(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_rotation_accepts_retired_key() {
        let old_secret = "a".repeat(32);
        let old = codec_with_secret("a");
        let (token, _) = old.issue(AccountId::new(), Utc::now()).unwrap();

        // New codec signs with a fresh secret under kid v2 but still accepts
        // v1-signed tokens.
        let config = AuthConfig::try_new("b".repeat(32), "v2").unwrap();
        let rotated = TokenCodec::new(&config).with_verification_key("v1", old_secret.as_bytes());

        assert!(rotated.parse(&token).is_ok());

        // Without the retired key, v1 tokens are rejected.
        let bare = TokenCodec::new(&config);
        assert!(matches!(bare.parse(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let codec = codec_with_secret("a");
        for garbage in ["", "nodots", "a.b", "a.b.c.d", "!!!.###.$$$"] {
            assert!(matches!(codec.parse(garbage), Err(AuthError::InvalidToken)));
        }
    }

    #[test]
    fn test_refresh_tokens_unique() {
        let codec = codec_with_secret("a");
        let a = codec.mint_refresh_token();
        let b = codec.mint_refresh_token();
        assert_ne!(a, b);
        // 32 bytes, URL-safe base64 without padding
        assert_eq!(a.len(), 43);
    }
}
