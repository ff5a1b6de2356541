//! HTTP response type definitions

use serde::{Deserialize, Serialize};

/// HTTP response for a successful publish.
///
/// # Example
///
/// ```json
/// {
///   "success": true,
///   "message": "Successfully added 2 files to branch add-intro",
///   "branch": "add-intro",
///   "files": ["docs/intro.md", "mkdocs.yml"],
///   "commits": ["3f1c...", "9ab2..."],
///   "mkdocsUpdated": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFilesResponse {
    pub success: bool,

    /// Human-readable summary
    pub message: String,

    pub branch: String,

    /// Committed paths
    pub files: Vec<String>,

    /// Commit SHAs, in the same order as `files`
    pub commits: Vec<String>,

    /// Whether `mkdocs.yml` was rewritten
    pub mkdocs_updated: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Current timestamp (RFC 3339)
    pub timestamp: String,
}
