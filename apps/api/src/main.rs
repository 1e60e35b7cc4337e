mod accounts;
mod auth;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::token::TokenService;
use crate::config::Config;
use crate::db::create_pool;
use crate::resume::parser::HttpResumeParser;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing DATABASE_URL / RESUME_PARSER_API_KEY
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting recruitment portal API v{}", env!("CARGO_PKG_VERSION"));
    if config.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set; tokens are signed with the built-in default secret");
    }

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;

    // Initialize resume parser client
    let parser = HttpResumeParser::new(
        config.resume_parser_url.clone(),
        config.resume_parser_api_key.clone(),
        config.resume_parser_timeout,
    )?;
    info!(
        "Resume parser client initialized ({}, timeout {:?})",
        config.resume_parser_url, config.resume_parser_timeout
    );

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        tokens: TokenService::new(config.jwt_secret.clone(), config.jwt_expiration_hours),
        parser: Arc::new(parser),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
