use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skillscope_api::config::Config;
use skillscope_api::llm_client::{self, OpenAiClient};
use skillscope_api::routes::build_router;
use skillscope_api::state::AppState;
use skillscope_api::taxonomy;

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

    info!("Starting Skillscope API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Skill taxonomy loaded: {} skills across {} categories",
        taxonomy::skill_count(),
        taxonomy::TAXONOMY.len()
    );

    // Document storage is configured for parity with the hosted deployment only
    match &config.storage {
        Some(storage) => info!(
            "Storage credentials present (project: {}, bucket: {})",
            storage.project_id, storage.bucket
        ),
        None => warn!("Storage credentials not configured"),
    }

    // Initialize LLM client
    let llm = OpenAiClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build the LLM HTTP client")?;
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        config.openai_base_url
    );

    info!(
        "Assistant program: {} at {}",
        config.program.name, config.program.institution
    );

    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("Invalid listen address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
