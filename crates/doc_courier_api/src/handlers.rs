//! HTTP request handlers
//!
//! Each handler:
//! 1. Extracts HTTP request data
//! 2. Translates HTTP types to domain types
//! 3. Calls the publishing pipeline
//! 4. Translates the domain result to an HTTP response

use axum::{body::Bytes, extract::State, Json};
use doc_courier_core::Publisher;
use github_client::{create_token_client, GitHubClient};
use tracing::info;

use crate::{
    errors::ApiError,
    models::{AddFilesRequest, AddFilesResponse, HealthCheckResponse},
    translation::{http_add_files_request_to_domain, publish_outcome_to_http, PublishCommand},
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// POST /api/v1/add-files-to-repo
///
/// Downloads the requested files and commits them to the requested branch.
/// Validation failures are answered before any outbound call is made. The
/// body is read as JSON whatever its `Content-Type`.
pub async fn add_files_to_repo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddFilesResponse>, ApiError> {
    let http_req: AddFilesRequest = serde_json::from_slice(&body)?;
    let PublishCommand { request, token } =
        http_add_files_request_to_domain(http_req, &state.config.defaults)?;

    info!(
        target_repo = %request.target(),
        branch = %request.branch(),
        file_count = request.files().len(),
        "Handling add-files request"
    );

    let client = GitHubClient::new(create_token_client(
        &token,
        &state.config.github_api_base,
    )?);
    let publisher = Publisher::new(&client, state.fetcher.as_ref());

    let outcome = publisher.publish(&request).await?;
    info!(message = %outcome.message(), "Add-files request completed");

    Ok(Json(publish_outcome_to_http(outcome)))
}

/// GET /api/v1/health
///
/// Returns service health status with version and timestamp.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
