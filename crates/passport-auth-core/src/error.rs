//! Auth errors

use thiserror::Error;

/// Authentication and account lifecycle errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email already registered
    #[error("email is already registered")]
    DuplicateAccount,

    /// Account not found
    #[error("account was not found")]
    AccountNotFound,

    /// Invalid credentials (wrong password)
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Invalid token (malformed, bad signature, expired, or consumed)
    #[error("invalid token")]
    InvalidToken,

    /// Storage constraint violation not otherwise classified
    #[error("conflict")]
    Conflict,

    /// Malformed caller input (email shape, password strength)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error (hashing, signing)
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateAccount | Self::Conflict => 409,
            Self::AccountNotFound => 404,
            Self::InvalidCredentials | Self::InvalidToken => 401,
            Self::InvalidArgument(_) => 400,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateAccount => "DUPLICATE_ACCOUNT",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Conflict => "CONFLICT",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<passport_db::DbError> for AuthError {
    fn from(err: passport_db::DbError) -> Self {
        match err {
            passport_db::DbError::Conflict => Self::Conflict,
            passport_db::DbError::NotFound => Self::AccountNotFound,
            passport_db::DbError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                Self::Database(e.to_string())
            }
        }
    }
}
