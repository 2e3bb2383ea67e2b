//! Passport DB - Database abstractions
//!
//! SQLx-based persistence layer for the Passport account service.
//!
//! # Example
//!
//! ```rust,ignore
//! use passport_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/passport").await?;
//! let repos = Repositories::new(pool);
//!
//! let account = repos.accounts.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;
