//! Passport Auth Core - Credential and session lifecycle logic
//!
//! Core account-authority functionality: atomic account provisioning,
//! credential verification, and access/refresh token issuance, rotation,
//! revocation, and validation.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

pub use config::*;
pub use error::*;
pub use password::*;
pub use service::*;
pub use session::*;
pub use token::*;
