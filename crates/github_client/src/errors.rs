//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Branch and commit failures carry enough context
//! (branch name, file path, server message) to be surfaced to a caller verbatim.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_branch_sha("owner", "repo", "main").await {
///     Ok(sha) => println!("main is at {sha}"),
///     Err(Error::RefNotFound { branch, .. }) => eprintln!("No branch named {branch}"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The GitHub API answered with a non-success status that has no more specific meaning.
    #[error("GitHub API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The GitHub client could not be constructed.
    ///
    /// This error occurs when the API base URL cannot be parsed or the
    /// underlying HTTP client fails to build.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// A pushed file could not be created or updated.
    ///
    /// The message contains the error body returned by GitHub, e.g. a SHA
    /// mismatch when the file changed since it was read.
    #[error("Failed to add file {path}: {message}")]
    Commit { path: String, message: String },

    /// A file was read but its content could not be decoded.
    #[error("Failed to decode content of {path}: {reason}")]
    ContentDecode { path: String, reason: String },

    /// A new branch reference could not be created.
    ///
    /// Only raised for failures other than "reference already exists", which
    /// is reported as [`crate::BranchCreation::AlreadyExists`].
    #[error("Failed to create branch {branch}: {message}")]
    BranchCreate { branch: String, message: String },

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested branch does not exist in the repository.
    #[error("Failed to get reference for branch {branch}: {message}")]
    RefNotFound { branch: String, message: String },
}
