//! Password hashing with Argon2id
//!
//! One-way credential hashing with a configurable work factor. Verification
//! is constant-time; a mismatch is an `Ok(false)`, not an error.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::{AuthConfig, AuthError};

/// Credential hasher with pre-validated Argon2 parameters.
///
/// Cheap to clone, so callers can move a copy onto a blocking thread: the
/// hash computation is intentionally CPU-expensive and must not run on an
/// async executor thread.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Create a hasher from the configured work factor.
    ///
    /// # Errors
    /// Returns [`AuthError::Configuration`] if the parameters are out of the
    /// range Argon2 accepts.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AuthError::Configuration(format!("argon2 params: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Password hashing failed: {}", e);
                AuthError::Internal("password hashing failed".to_string())
            })?;

        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; an error only when the stored hash
    /// itself is malformed.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            tracing::error!("Stored password hash is malformed: {}", e);
            AuthError::Internal("malformed password hash".to_string())
        })?;

        // Params travel inside the hash string, so verification works across
        // work-factor changes.
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => {
                tracing::error!("Password verification failed: {}", e);
                Err(AuthError::Internal("password verification failed".to_string()))
            }
        }
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> CredentialHasher {
        // Light work factor to keep tests fast
        let config = AuthConfig::try_new("a".repeat(32), "v1")
            .unwrap()
            .with_argon2_params(8, 1, 1);
        CredentialHasher::new(&config).unwrap()
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let hasher = test_hasher();
        let hash = hasher.hash("password123").unwrap();

        assert!(hasher.verify("password123", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = test_hasher();
        let a = hasher.hash("password123").unwrap();
        let b = hasher.hash("password123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_plaintext_never_stored() {
        let hasher = test_hasher();
        let hash = hasher.hash("password123").unwrap();
        assert!(!hash.contains("password123"));
    }

    #[test]
    fn test_malformed_hash_is_error_not_mismatch() {
        let hasher = test_hasher();
        let result = hasher.verify("password123", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }
}
