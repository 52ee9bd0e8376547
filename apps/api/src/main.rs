mod colleges;
mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::colleges::client::CollegeClient;
use crate::config::Config;
use crate::generation::orchestrator::Orchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Margadarshi API v{}", env!("CARGO_PKG_VERSION"));

    // One connection pool shared by every provider adapter and the college client.
    // Per-call timeouts come from each ProviderConfig.
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    for provider in &config.providers {
        if provider.credential().is_none() {
            warn!(
                "{} API key not set; {} will be skipped",
                provider.name, provider.name
            );
        }
    }

    let orchestrator = Orchestrator::from_configs(config.providers.clone(), &http);
    info!(
        "Generation providers (in order): {}",
        orchestrator.provider_names().join(" -> ")
    );

    let colleges = CollegeClient::new(http, &config.college_api_url, config.college_timeout)?;
    info!("College directory: {}", config.college_api_url);

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        colleges,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the deployed frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
