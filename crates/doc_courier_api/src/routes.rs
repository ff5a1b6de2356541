//! HTTP routing configuration
//!
//! # Route Structure
//!
//! All routes are prefixed with `/api/v1`:
//!
//! - POST   /api/v1/add-files-to-repo - Publish files onto a branch
//! - GET    /api/v1/health - Health check

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete API router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes
/// - CORS configuration
/// - Request tracing
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new())
        .on_response(DefaultOnResponse::new());

    let api_v1 = Router::new()
        .route("/add-files-to-repo", post(handlers::add_files_to_repo))
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);

    // Root router with API version prefix
    Router::new().nest("/api/v1", api_v1)
}
