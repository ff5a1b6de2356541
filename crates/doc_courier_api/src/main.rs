//! Doc Courier REST API Server
//!
//! Main binary for running the API server.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter (default: info)
//! - `LOG_FORMAT`: `text` or `json` (default: text)
//! - see [`doc_courier_api::config`] for the rest

use anyhow::Context;
use doc_courier_api::{ApiServer, AppState, LogFormat, ServiceConfig, API_VERSION};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("Invalid service configuration")?;

    init_tracing(config.log_format);

    tracing::info!("Starting Doc Courier API server");
    tracing::info!("API version: {}", API_VERSION);
    tracing::info!(
        github_api_base = %config.github_api_base,
        default_repository = %format!("{}/{}", config.defaults.owner, config.defaults.repo),
        default_base_branch = %config.defaults.base_branch,
        "Loaded configuration"
    );

    let server = ApiServer::new(AppState::new(config));

    // Start server with graceful shutdown
    server.serve().await
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}
