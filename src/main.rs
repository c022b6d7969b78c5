//! Ollama Bridge - Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use ollama_bridge::{
    api,
    catalog::{CatalogCache, LibraryScraper, SizeClassifier, SystemClock},
    config::BridgeConfig,
    runtime::{ModelEnricher, RuntimeClient},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(name = "ollama-bridge")]
#[command(about = "REST proxy for a local Ollama runtime", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override API port
    #[arg(long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log format (json or pretty)
    #[arg(long, default_value = "json")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    match cli.log_format.as_str() {
        "pretty" => {
            tracing_subscriber::fmt()
                .with_env_filter(&cli.log_level)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(&cli.log_level)
                .json()
                .init();
        }
    }

    tracing::info!("Starting Ollama Bridge");

    // Load configuration
    let mut config = BridgeConfig::load(cli.config)?;

    // CLI overrides
    if let Some(port) = cli.port {
        config.api_port = port;
    }

    config.validate()?;

    tracing::info!(
        api_port = config.api_port,
        runtime_url = %config.runtime_url,
        library_origin = %config.library_origin,
        catalog_cache_ttl_secs = config.catalog_cache_ttl_secs,
        "Configuration loaded"
    );

    // Shared HTTP client for both upstreams
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    // Composition root: scraper feeds both the cache and the enricher
    let classifier = SizeClassifier::new(config.suitability_threshold_b);
    let scraper = Arc::new(LibraryScraper::new(
        http.clone(),
        config.library_origin.clone(),
        config.known_param_sizes.clone(),
        classifier,
    ));
    let runtime = RuntimeClient::new(http, config.runtime_url.clone());
    let catalog = Arc::new(CatalogCache::new(
        scraper.clone(),
        Arc::new(SystemClock),
        Duration::from_secs(config.catalog_cache_ttl_secs),
    ));
    let enricher = Arc::new(ModelEnricher::new(
        runtime.clone(),
        scraper,
        config.enrichment_scrape_limit,
    ));

    // Setup API
    let app_state = api::AppState {
        enricher,
        runtime: Arc::new(runtime),
        catalog,
        catalog_page_limit: config.catalog_page_limit,
    };

    let app = api::create_router(app_state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.api_port));
    tracing::info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind API server")?;

    // Graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}
