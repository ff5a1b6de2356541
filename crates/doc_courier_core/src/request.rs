//! Publish request types.
//!
//! A [`PublishRequest`] is the validated form of an incoming request: it always
//! has at least one file and a target branch. Optional settings fall back to
//! [`RequestDefaults`].

use serde::{Deserialize, Serialize};

use crate::ValidationError;

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Repository owner used when the request does not name one.
pub const DEFAULT_OWNER: &str = "kannwism";

/// Repository used when the request does not name one.
pub const DEFAULT_REPO: &str = "hh-docs";

/// Branch new branches are created from when the request does not name one.
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Commit message prefix used when the request does not supply one.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Add files via edge function";

/// A single file to fetch and place in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRequest {
    /// Where to download the file from
    pub url: String,

    /// Destination path in the repository
    pub path: String,
}

impl FileRequest {
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }
}

/// Owner and name of the repository being written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Fallback values for the optional parts of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub owner: String,
    pub repo: String,
    pub base_branch: String,
    pub commit_message: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

/// A validated request to publish files onto a branch.
///
/// # Examples
///
/// ```
/// use doc_courier_core::{FileRequest, PublishRequest, RequestDefaults};
///
/// let request = PublishRequest::new(
///     vec![FileRequest::new("https://example.com/intro.mdx", "docs/intro.mdx")],
///     "add-docs",
///     &RequestDefaults::default(),
/// )
/// .unwrap()
/// .with_base_branch("develop");
///
/// assert_eq!(request.branch(), "add-docs");
/// assert_eq!(request.base_branch(), "develop");
/// assert_eq!(request.target().to_string(), "kannwism/hh-docs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    files: Vec<FileRequest>,
    branch: String,
    base_branch: String,
    commit_message: String,
    target: RepositoryTarget,
}

impl PublishRequest {
    /// Creates a request, filling unset options from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `files` is empty or `branch` is blank.
    pub fn new(
        files: Vec<FileRequest>,
        branch: impl Into<String>,
        defaults: &RequestDefaults,
    ) -> Result<Self, ValidationError> {
        if files.is_empty() {
            return Err(ValidationError::empty_list("fileUrls"));
        }

        let branch = branch.into();
        if branch.trim().is_empty() {
            return Err(ValidationError::missing_field("branchName"));
        }

        Ok(Self {
            files,
            branch,
            base_branch: defaults.base_branch.clone(),
            commit_message: defaults.commit_message.clone(),
            target: RepositoryTarget {
                owner: defaults.owner.clone(),
                repo: defaults.repo.clone(),
            },
        })
    }

    pub fn with_target(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.target = RepositoryTarget {
            owner: owner.into(),
            repo: repo.into(),
        };
        self
    }

    pub fn with_base_branch(mut self, base_branch: impl Into<String>) -> Self {
        self.base_branch = base_branch.into();
        self
    }

    pub fn with_commit_message(mut self, commit_message: impl Into<String>) -> Self {
        self.commit_message = commit_message.into();
        self
    }

    pub fn files(&self) -> &[FileRequest] {
        &self.files
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    pub fn target(&self) -> &RepositoryTarget {
        &self.target
    }

    /// Commit message used for the file at `path`.
    pub fn commit_message_for(&self, path: &str) -> String {
        format!("{}: {}", self.commit_message, path)
    }
}
