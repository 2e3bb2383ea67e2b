//! Profile types

use serde::{Deserialize, Serialize};

use crate::AccountId;

/// Profile owned 1:1 by an account.
///
/// All fields are optional and default to empty; the profile row itself is
/// created together with its account and never outlives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Owning account
    pub account_id: AccountId,
    /// Full display name
    pub full_name: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Avatar reference (URL)
    pub avatar_url: String,
}

/// Fields accepted by a profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}
