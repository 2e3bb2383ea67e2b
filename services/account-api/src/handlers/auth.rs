//! Authentication handlers (register, login, logout, refresh, revoke, validate)

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use passport_types::{SessionView, TokenHint};

use crate::error::{ApiError, ApiResult};
use crate::extractors::BearerToken;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<SessionView> for SessionResponse {
    fn from(session: SessionView) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            token_type: session.token_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    pub token: String,
    pub token_type_hint: TokenHint,
}

#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub account_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/auth/register
///
/// Create an account with an empty profile and return its initial session
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let session = state.auth.register(&req.email, &req.password).await?;

    tracing::info!("Account registered");

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and issue a new session
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(session.into()))
}

/// POST /api/v1/auth/logout
///
/// Delete the session behind the presented access token (idempotent)
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<RevokeResponse>> {
    state.auth.logout(&token).await?;
    Ok(Json(RevokeResponse { success: true }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a fresh pair (single-use rotation)
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<SessionResponse>> {
    if req.refresh_token.is_empty() {
        return Err(ApiError::BadRequest("refresh_token is required".to_string()));
    }

    let session = state.auth.refresh_token(&req.refresh_token).await?;
    Ok(Json(session.into()))
}

/// POST /api/v1/auth/revoke
///
/// Revoke the session matching the token under the given hint (idempotent)
pub async fn revoke(
    State(state): State<AppState>,
    Json(req): Json<RevokeRequest>,
) -> ApiResult<Json<RevokeResponse>> {
    if req.token.is_empty() {
        return Err(ApiError::BadRequest("token is required".to_string()));
    }

    state.auth.revoke_token(&req.token, req.token_type_hint).await?;
    Ok(Json(RevokeResponse { success: true }))
}

/// POST /api/v1/auth/validate
///
/// Verify signature and expiry of an access token
pub async fn validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> ApiResult<Json<ValidateResponse>> {
    let account_id = state.auth.validate_token(&req.access_token)?;

    Ok(Json(ValidateResponse {
        account_id: account_id.to_string(),
    }))
}
