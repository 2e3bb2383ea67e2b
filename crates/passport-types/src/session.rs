//! Session and token types

use serde::{Deserialize, Serialize};

/// Token pair returned after registration, login, or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    /// Signed access token (short-lived)
    pub access_token: String,
    /// Opaque refresh token (single-use)
    pub refresh_token: String,
    /// Access token lifetime in seconds, derived from the token's own expiry
    pub expires_in: i64,
    /// Token type (always "Bearer")
    pub token_type: String,
}

/// Token-type hint accepted by the revoke operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenHint {
    AccessToken,
    RefreshToken,
}
