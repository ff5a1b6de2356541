//! Request middleware

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// Request tracing middleware.
///
/// Tags every request with a fresh request ID. Events raised while handling
/// the request are recorded inside a span carrying that ID.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!("request", request_id = %request_id);

    tracing::info!(
        parent: &span,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let response = next.run(request).instrument(span.clone()).await;

    tracing::info!(
        parent: &span,
        status = %response.status(),
        "Request completed"
    );

    response
}
