//! Account and profile handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use passport_auth_core::AccountDetail;
use passport_types::{AccountId, Profile, ProfileUpdate};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthAccount;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub profile: ProfileBody,
}

#[derive(Debug, Serialize)]
pub struct ProfileBody {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

impl From<AccountDetail> for AccountResponse {
    fn from(detail: AccountDetail) -> Self {
        Self {
            id: detail.account.id.to_string(),
            email: detail.account.email,
            is_active: detail.account.is_active,
            created_at: detail.account.created_at.to_rfc3339(),
            updated_at: detail.account.updated_at.to_rfc3339(),
            profile: detail.profile.into(),
        }
    }
}

impl From<Profile> for ProfileBody {
    fn from(profile: Profile) -> Self {
        Self {
            full_name: profile.full_name,
            first_name: profile.first_name,
            last_name: profile.last_name,
            avatar_url: profile.avatar_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub accounts: Vec<AccountResponse>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar_url: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/accounts/{id}
pub async fn get_account(
    State(state): State<AppState>,
    _auth: AuthAccount,
    Path(id): Path<String>,
) -> ApiResult<Json<AccountResponse>> {
    let account_id = parse_account_id(&id)?;
    let detail = state.auth.get_account(account_id).await?;
    Ok(Json(detail.into()))
}

/// GET /api/v1/accounts?page=1&page_size=20
pub async fn list_accounts(
    State(state): State<AppState>,
    _auth: AuthAccount,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse>> {
    let page = state.auth.list_accounts(query.page, query.page_size).await?;

    Ok(Json(ListResponse {
        accounts: page.accounts.into_iter().map(Into::into).collect(),
        total_count: page.total_count,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// DELETE /api/v1/accounts/{id}
///
/// Deletes the account together with its profile and sessions
pub async fn delete_account(
    State(state): State<AppState>,
    _auth: AuthAccount,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let account_id = parse_account_id(&id)?;
    state.auth.delete_account(account_id).await?;

    tracing::info!(account_id = %account_id, "Account deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/accounts/{id}/profile
pub async fn get_profile(
    State(state): State<AppState>,
    _auth: AuthAccount,
    Path(id): Path<String>,
) -> ApiResult<Json<ProfileBody>> {
    let account_id = parse_account_id(&id)?;
    let profile = state.auth.get_profile(account_id).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/v1/accounts/{id}/profile
pub async fn update_profile(
    State(state): State<AppState>,
    _auth: AuthAccount,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileBody>> {
    let account_id = parse_account_id(&id)?;

    let update = ProfileUpdate {
        full_name: req.full_name,
        first_name: req.first_name,
        last_name: req.last_name,
        avatar_url: req.avatar_url,
    };

    let profile = state.auth.update_profile(account_id, update).await?;
    Ok(Json(profile.into()))
}

fn parse_account_id(id: &str) -> Result<AccountId, ApiError> {
    AccountId::parse(id).map_err(|_| ApiError::BadRequest("invalid account id".to_string()))
}
