//! Passport Types - Shared domain types
//!
//! This crate contains domain types used across Passport services:
//! - Account identity and activation state
//! - Profile data owned 1:1 by an account
//! - Issued sessions (access/refresh token pairs)

pub mod account;
pub mod profile;
pub mod session;

pub use account::*;
pub use profile::*;
pub use session::*;
