//! Configuration types for the auth service

use std::time::Duration;

use crate::AuthError;

/// Auth service configuration
///
/// The signing secret and hash work factor are explicit construction-time
/// state; nothing in this crate reads process-global configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for access-token signing (must be at least 32 bytes)
    pub token_secret: String,
    /// Key id embedded in token headers; lets verification accept tokens
    /// signed by retired keys during a rotation window
    pub token_key_id: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Minimum accepted password length
    pub min_password_len: usize,
    /// Argon2 memory cost in KiB
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count
    pub argon2_iterations: u32,
    /// Argon2 parallelism factor
    pub argon2_parallelism: u32,
}

impl AuthConfig {
    /// Minimum allowed secret length in bytes (256 bits)
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a new auth config with default TTL and hashing parameters.
    ///
    /// # Errors
    /// Returns [`AuthError::Configuration`] if the secret is shorter than
    /// 32 bytes.
    pub fn try_new(
        token_secret: impl Into<String>,
        token_key_id: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let token_secret = token_secret.into();
        if token_secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "token secret too short: got {} bytes, need at least {}",
                token_secret.len(),
                Self::MIN_SECRET_LENGTH
            )));
        }

        Ok(Self {
            token_secret,
            token_key_id: token_key_id.into(),
            access_token_ttl: Duration::from_secs(3600),
            min_password_len: 8,
            argon2_memory_kib: 19 * 1024,
            argon2_iterations: 2,
            argon2_parallelism: 1,
        })
    }

    /// Set the access token lifetime
    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    /// Set the minimum password length
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Set the Argon2 work factor
    pub fn with_argon2_params(mut self, memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        self.argon2_memory_kib = memory_kib;
        self.argon2_iterations = iterations;
        self.argon2_parallelism = parallelism;
        self
    }
}

// The signing secret must never reach a log line.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"<redacted>")
            .field("token_key_id", &self.token_key_id)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("min_password_len", &self.min_password_len)
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .field("argon2_parallelism", &self.argon2_parallelism)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = AuthConfig::try_new("short", "v1");
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_valid_secret_accepted() {
        let config = AuthConfig::try_new("a".repeat(32), "v1").unwrap();
        assert_eq!(config.access_token_ttl, Duration::from_secs(3600));
        assert_eq!(config.min_password_len, 8);
    }
}
