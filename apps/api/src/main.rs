mod assist;
mod bridge;
mod config;
mod engine;
mod errors;
mod journal;
mod llm_client;
mod models;
mod network;
mod pipeline;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::NexusStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting nexus-api v{}", env!("CARGO_PKG_VERSION"));

    // The collaborator degrades gracefully without a credential: sessions
    // fail with a configuration error, the engine keeps working.
    if config.gemini_api_key.is_none() {
        info!("GEMINI_API_KEY not set; AI endpoints will report a configuration error");
    }
    let collaborator = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));

    // Session-scoped in-memory store; state arrives via the snapshot bridge.
    let store = Arc::new(RwLock::new(NexusStore::new()));

    let state = AppState {
        store,
        collaborator,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
