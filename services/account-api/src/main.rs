//! Passport Account API
//!
//! HTTP service exposing account registration, credential login, and the
//! session lifecycle (refresh, revoke, logout, validate) plus account and
//! profile management.

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Passport Account API");

    let config = Config::from_env()?;
    let http_port = config.http_port;

    // Connect to the database
    let pool = passport_db::create_pool(&config.database_url).await?;
    tracing::info!("Connected to database");

    let state = AppState::new(pool, config)?;

    // Build router
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route("/api/v1/auth/refresh", post(handlers::refresh))
        .route("/api/v1/auth/revoke", post(handlers::revoke))
        .route("/api/v1/auth/validate", post(handlers::validate))
        .route("/api/v1/accounts", get(handlers::list_accounts))
        .route(
            "/api/v1/accounts/{id}",
            get(handlers::get_account).delete(handlers::delete_account),
        )
        .route(
            "/api/v1/accounts/{id}/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
