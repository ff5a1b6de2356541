//! Doc Courier REST API
//!
//! HTTP surface for publishing remote files onto a GitHub branch.
//!
//! # Architecture
//!
//! This crate is the HTTP layer only. It handles:
//! - HTTP request/response translation
//! - Error mapping from domain to HTTP
//! - Routing, middleware and server configuration
//!
//! The publishing itself lives in `doc_courier_core`. The dependency flows
//! HTTP API → business logic, never the reverse.

use std::sync::Arc;

use doc_courier_core::{FileFetcher, HttpFileFetcher};

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod translation;

pub use config::{ConfigError, LogFormat, ServiceConfig};
pub use errors::{ApiError, ErrorResponse};
pub use server::ApiServer;

/// API version
pub const API_VERSION: &str = "v1";

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
///
/// A GitHub client is built per request from the caller's token, so only the
/// configuration and the download client are shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub fetcher: Arc<dyn FileFetcher>,
}

impl AppState {
    /// Create application state downloading over HTTP
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_fetcher(config, Arc::new(HttpFileFetcher::default()))
    }

    pub fn with_fetcher(config: ServiceConfig, fetcher: Arc<dyn FileFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
