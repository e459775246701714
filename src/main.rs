// repostats - Main entry point.
// Loads configuration, initializes tracing, and serves the HTTP API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repostats::{AppState, Config, RepoStatsService, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repostats=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    info!("Starting repostats v{}", env!("CARGO_PKG_VERSION"));

    let service = RepoStatsService::from_config(&config).context("Invalid configuration")?;
    info!(
        api_base = %config.api_base,
        per_page = config.per_page,
        cache_ttl_secs = config.cache_ttl_secs,
        "Pipeline initialized"
    );

    let app = build_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
