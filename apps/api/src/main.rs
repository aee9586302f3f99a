mod chat_client;
mod config;
mod db;
mod errors;
mod extract;
mod models;
mod resources;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat_client::ChatClient;
use crate::config::{Config, StoreBackend};
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SSLP API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize chat proxy client
    let chat = ChatClient::new(
        config.openai_api_url.clone(),
        config.openai_api_key.clone(),
        config.chat_timeout,
    )
    .context("Failed to build chat HTTP client")?;
    info!("Chat client initialized (model: {})", chat_client::MODEL);

    // Initialize the record store
    let state = match config.store_backend {
        StoreBackend::Postgres => {
            let db = create_pool(&config).await?;
            ensure_schema(&db).await?;
            AppState::postgres(&db, chat)
        }
        StoreBackend::Memory => {
            info!("Using in-memory record store; data is not persisted");
            AppState::in_memory(chat)
        }
    };

    // Build router
    let app = build_router(state)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
