//! HTTP handlers

mod account;
mod auth;
mod health;

pub use account::{delete_account, get_account, get_profile, list_accounts, update_profile};
pub use auth::{login, logout, refresh, register, revoke, validate};
pub use health::{health, ready};
