//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for the handful of repository operations needed
//! to push files onto a branch: resolving and creating branch references, reading
//! files at a ref and creating or updating files through the Contents API.
//! Requests are authenticated with a caller-supplied bearer token.

use async_trait::async_trait;
use http::{header::HeaderName, StatusCode};
use octocrab::{Octocrab, Result as OctocrabResult};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod contents;
pub use contents::{BranchCreation, FileCommit, FileContent};

use contents::{ContentEntry, ContentWriteResponse, CreateRefPayload, GitRef, RefQuery};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// REST API version sent with every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// A client for interacting with the GitHub API on behalf of a token holder.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already configured `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build an instance authenticated with a
    /// personal or installation token.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    async fn get_content_entry(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<ContentEntry>, Error> {
        let route = format!("/repos/{owner}/{repo}/contents/{path}");
        let query = RefQuery { git_ref };
        let response: OctocrabResult<ContentEntry> = self.client.get(route, Some(&query)).await;

        match response {
            Ok(entry) => Ok(Some(entry)),
            Err(e) if github_status(&e) == Some(StatusCode::NOT_FOUND) => {
                debug!(path = path, git_ref = git_ref, "File not found at ref");
                Ok(None)
            }
            Err(e) => {
                let err = api_error(&e);
                log_octocrab_error("Failed to read file contents", e);
                Err(err)
            }
        }
    }
}

#[async_trait]
impl RepositoryClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn get_branch_sha(&self, owner: &str, repo: &str, branch: &str) -> Result<String, Error> {
        info!("Getting reference for branch");

        let route = format!("/repos/{owner}/{repo}/git/ref/heads/{branch}");
        let response: OctocrabResult<GitRef> = self.client.get(route, None::<&()>).await;

        match response {
            Ok(git_ref) => {
                debug!(sha = %git_ref.object.sha, "Resolved branch reference");
                Ok(git_ref.object.sha)
            }
            Err(e) if github_status(&e) == Some(StatusCode::NOT_FOUND) => {
                let message = github_message(&e);
                warn!("Branch reference does not exist");
                Err(Error::RefNotFound {
                    branch: branch.to_string(),
                    message,
                })
            }
            Err(e) => {
                let err = api_error(&e);
                log_octocrab_error("Failed to get branch reference", e);
                Err(err)
            }
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        from_sha: &str,
    ) -> Result<BranchCreation, Error> {
        info!(from_sha = from_sha, "Creating branch");

        let route = format!("/repos/{owner}/{repo}/git/refs");
        let payload = CreateRefPayload {
            git_ref: format!("refs/heads/{branch}"),
            sha: from_sha,
        };
        let response: OctocrabResult<serde_json::Value> =
            self.client.post(route, Some(&payload)).await;

        match response {
            Ok(_) => {
                info!("Successfully created branch");
                Ok(BranchCreation::Created)
            }
            Err(e) if github_status(&e) == Some(StatusCode::UNPROCESSABLE_ENTITY) => {
                info!(
                    github_message = %github_message(&e),
                    "Branch already exists, using existing branch"
                );
                Ok(BranchCreation::AlreadyExists)
            }
            Err(e) => {
                let message = github_message(&e);
                log_octocrab_error("Failed to create branch", e);
                Err(Error::BranchCreate {
                    branch: branch.to_string(),
                    message,
                })
            }
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path, git_ref = %git_ref))]
    async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<FileContent>, Error> {
        match self.get_content_entry(owner, repo, path, git_ref).await? {
            Some(entry) => entry.into_file_content(path).map(Some),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path, branch = %branch))]
    async fn get_file_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, Error> {
        let sha = self
            .get_content_entry(owner, repo, path, branch)
            .await?
            .map(|entry| entry.sha);

        if let Some(sha) = &sha {
            info!(sha = %sha, "File already exists on branch");
        }

        Ok(sha)
    }

    #[instrument(skip(self, commit), fields(owner = %owner, repo = %repo, path = %commit.path, branch = %commit.branch))]
    async fn put_file(&self, owner: &str, repo: &str, commit: &FileCommit) -> Result<String, Error> {
        debug!(create = commit.is_create(), "Writing file");

        let route = format!("/repos/{}/{}/contents/{}", owner, repo, commit.path);
        let response: OctocrabResult<ContentWriteResponse> =
            self.client.put(route, Some(commit)).await;

        match response {
            Ok(written) => {
                info!(commit_sha = %written.commit.sha, "Committed file");
                Ok(written.commit.sha)
            }
            Err(e) => {
                let message = github_message(&e);
                log_octocrab_error("Failed to commit file", e);
                Err(Error::Commit {
                    path: commit.path.clone(),
                    message,
                })
            }
        }
    }
}

/// Trait for the repository operations needed to push files onto a branch.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// Resolves a branch name to the SHA of the commit it points at.
    ///
    /// # Errors
    ///
    /// Returns `Error::RefNotFound` if the branch does not exist, or
    /// `Error::ApiError` for any other failure.
    async fn get_branch_sha(&self, owner: &str, repo: &str, branch: &str) -> Result<String, Error>;

    /// Creates `branch` pointing at `from_sha`.
    ///
    /// An existing branch of the same name is not an error: it is reported as
    /// [`BranchCreation::AlreadyExists`] and left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Error::BranchCreate` for any failure other than the branch
    /// already existing.
    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        from_sha: &str,
    ) -> Result<BranchCreation, Error>;

    /// Reads a file at the given ref.
    ///
    /// Returns `Ok(None)` when the file does not exist at that ref.
    ///
    /// # Errors
    ///
    /// Returns `Error::ApiError` for failures other than "not found", and
    /// `Error::ContentDecode` if the returned content cannot be decoded.
    async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<FileContent>, Error>;

    /// Looks up the blob SHA of a file on a branch.
    ///
    /// Returns `Ok(None)` when the file does not exist, which means a write
    /// to that path is a create rather than an update.
    ///
    /// # Errors
    ///
    /// Returns `Error::ApiError` for failures other than "not found".
    async fn get_file_sha(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, Error>;

    /// Creates or updates a file and returns the SHA of the resulting commit.
    ///
    /// # Errors
    ///
    /// Returns `Error::Commit`, carrying the path and the GitHub error body,
    /// on any non-success response.
    async fn put_file(&self, owner: &str, repo: &str, commit: &FileCommit) -> Result<String, Error>;
}

/// Creates an `Octocrab` client authenticated with a bearer token.
///
/// The client talks to `api_base` (normally [`DEFAULT_API_BASE`]) and sends
/// the `X-GitHub-Api-Version` header on every request.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the base URL is invalid or the client
/// cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, DEFAULT_API_BASE};
///
/// # fn example() -> Result<(), github_client::Error> {
/// let octocrab = create_token_client("ghp_example", DEFAULT_API_BASE)?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, api_base: &str) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .base_uri(api_base)
        .map_err(|e| {
            error!(api_base = api_base, error = %e, "Invalid GitHub API base URL");
            Error::AuthError(format!("Invalid GitHub API base URL '{api_base}': {e}"))
        })?
        .add_header(
            HeaderName::from_static("x-github-api-version"),
            GITHUB_API_VERSION.to_string(),
        )
        .personal_token(token.to_string())
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to build token authenticated GitHub client");
            Error::AuthError(e.to_string())
        })
}

/// Returns the HTTP status GitHub answered with, if the error came from GitHub.
fn github_status(e: &octocrab::Error) -> Option<StatusCode> {
    match e {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code),
        _ => None,
    }
}

/// Returns the message GitHub sent with an error, or the error text otherwise.
fn github_message(e: &octocrab::Error) -> String {
    match e {
        octocrab::Error::GitHub { source, .. } => source.message.clone(),
        other => other.to_string(),
    }
}

fn api_error(e: &octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => Error::ApiError {
            status: source.status_code.as_u16(),
            message: source.message.clone(),
        },
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => Error::InvalidResponse,
        other => Error::ApiError {
            status: 0,
            message: other.to_string(),
        },
    }
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            error!(
                error_message = err.message,
                status = err.status_code.as_u16(),
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
