//! HTTP request and response models
//!
//! These types exist only in the HTTP layer and are translated to and from
//! domain types in [`crate::translation`].

pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::AddFilesRequest;
pub use response::{AddFilesResponse, HealthCheckResponse};
