mod config;
mod errors;
mod export;
mod generation;
mod interview;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::speech::GoogleTranslateTts;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

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

    info!("Starting career coach v{}", env!("CARGO_PKG_VERSION"));

    if config.has_configured_key() {
        info!("Gemini credential configured");
    } else {
        warn!(
            "No {} in {} or the environment; generation requires a key entered per session",
            crate::config::API_KEY_VAR,
            config.secrets_path.display()
        );
    }

    let generator = Arc::new(GeminiClient::new(config.gemini_model.clone())?);
    info!("LLM client initialized (model: {})", config.gemini_model);

    let speech = Arc::new(GoogleTranslateTts::new()?);

    let state = AppState {
        config: config.clone(),
        generator,
        speech,
        sessions: SessionStore::default(),
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
