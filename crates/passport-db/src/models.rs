//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Account row from the database
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub account_id: Uuid,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Session row from the database
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversion implementations from row types to passport-types domain types

impl AccountRow {
    /// Convert to domain AccountId
    pub fn account_id(&self) -> passport_types::AccountId {
        passport_types::AccountId(self.id)
    }

    /// Convert to the domain account view (drops the password hash)
    pub fn to_account(&self) -> passport_types::Account {
        passport_types::Account {
            id: self.account_id(),
            email: self.email.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl ProfileRow {
    /// Convert to the domain profile view
    pub fn to_profile(&self) -> passport_types::Profile {
        passport_types::Profile {
            account_id: passport_types::AccountId(self.account_id),
            full_name: self.full_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

impl SessionRow {
    /// Convert to domain AccountId
    pub fn account_id(&self) -> passport_types::AccountId {
        passport_types::AccountId(self.account_id)
    }
}
