mod analytics;
mod catalog;
mod config;
mod errors;
mod exam;
mod llm_client;
mod pages;
mod review;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::exam::session::InMemorySessionStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging; analytics events get their own target
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},analytics=info,tower_http=info",
                env!("CARGO_PKG_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Simulado API v{}", env!("CARGO_PKG_VERSION"));

    // Load the read-only catalog
    let catalog = Arc::new(Catalog::load(&config.data_dir)?);

    // Initialize LLM client (serves both text generation and speech)
    let llm = Arc::new(LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?);
    info!(
        "LLM client initialized (questions: {}, script: {}, timeout: {}s)",
        llm_client::QUESTION_MODEL,
        llm_client::SCRIPT_MODEL,
        config.llm_timeout_secs
    );

    let sessions = Arc::new(InMemorySessionStore::new(chrono::Duration::minutes(
        config.session_ttl_minutes,
    )));

    tokio::fs::create_dir_all(&config.static_dir).await?;

    let state = AppState {
        config: config.clone(),
        catalog,
        llm: llm.clone(),
        speech: llm,
        sessions,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
