//! Error types for the publishing pipeline.
//!
//! Errors are grouped by the stage that raises them:
//!
//! - [`ValidationError`]: the request is unusable; raised before any remote call
//! - [`CourierError::Repository`]: branch setup or a commit failed on GitHub
//! - [`CourierError::Download`]: a source URL could not be fetched; nothing was committed
//! - [`CourierError::NavUpdate`]: the navigation config could not be merged; the
//!   pipeline logs it and carries on without the config file

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type alias for publishing operations.
pub type CourierResult<T> = Result<T, CourierError>;

/// Top-level error for the publishing pipeline.
#[derive(Error, Debug)]
pub enum CourierError {
    #[error(transparent)]
    Repository(#[from] github_client::Error),

    #[error("Failed to download file from {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to update navigation config: {reason}")]
    NavUpdate { reason: String },
}

impl CourierError {
    pub(crate) fn nav_update(reason: impl Into<String>) -> Self {
        CourierError::NavUpdate {
            reason: reason.into(),
        }
    }
}

/// Problems with the incoming publish request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} array is required and must not be empty")]
    EmptyList { field: String },

    #[error("{field} is required")]
    MissingField { field: String },
}

impl ValidationError {
    pub fn empty_list(field: impl Into<String>) -> Self {
        ValidationError::EmptyList {
            field: field.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }
}
