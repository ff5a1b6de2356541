//! Repository contents domain types.
//!
//! This module contains the types exchanged with the GitHub Contents and Git
//! References APIs: file reads, file writes and branch references.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;

/// A file read from a repository at a given ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Decoded file bytes
    pub content: Vec<u8>,

    /// Blob SHA of the file, required to update it
    pub sha: String,
}

impl FileContent {
    /// Returns the content as UTF-8 text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// A single file write against the Contents API.
///
/// When `sha` is `None` the file is created; when it is set the existing
/// blob with that SHA is replaced. GitHub rejects the write if the SHA no
/// longer matches the file on the branch.
///
/// # Examples
///
/// ```rust
/// use github_client::FileCommit;
///
/// let commit = FileCommit {
///     path: "docs/intro.md".to_string(),
///     content: "IyBJbnRybwo=".to_string(),
///     message: "Add files: docs/intro.md".to_string(),
///     branch: "add-docs".to_string(),
///     sha: None,
/// };
/// assert!(commit.is_create());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCommit {
    /// Repository path of the file; part of the URL, not the body
    #[serde(skip)]
    pub path: String,

    /// Base64-encoded file content
    pub content: String,

    /// Commit message
    pub message: String,

    /// Branch to commit to
    pub branch: String,

    /// Blob SHA of the file being replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl FileCommit {
    /// Whether this write creates a new file rather than updating one.
    pub fn is_create(&self) -> bool {
        self.sha.is_none()
    }
}

/// Outcome of a branch creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCreation {
    /// A new reference was created
    Created,

    /// The branch already existed and is reused as-is
    AlreadyExists,
}

/// Body of a reference creation request.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sha: &'a str,
}

/// Query string used to read a file at a ref.
#[derive(Debug, Serialize)]
pub(crate) struct RefQuery<'a> {
    #[serde(rename = "ref")]
    pub git_ref: &'a str,
}

/// A Git reference as returned by `GET /repos/{owner}/{repo}/git/ref/{ref}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GitRef {
    pub object: GitObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitObject {
    pub sha: String,
}

/// A file entry as returned by `GET /repos/{owner}/{repo}/contents/{path}`.
///
/// Only the fields needed for reads and SHA lookups are kept.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentEntry {
    pub sha: String,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub encoding: Option<String>,
}

impl ContentEntry {
    /// Decodes the entry into a [`FileContent`].
    ///
    /// GitHub wraps base64 content at 60 columns, so whitespace is removed
    /// before decoding.
    pub fn into_file_content(self, path: &str) -> Result<FileContent, Error> {
        let encoded = self.content.unwrap_or_default();
        let content = match self.encoding.as_deref() {
            Some("base64") | None => {
                let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD
                    .decode(compact.as_bytes())
                    .map_err(|e| Error::ContentDecode {
                        path: path.to_string(),
                        reason: e.to_string(),
                    })?
            }
            Some(other) => {
                return Err(Error::ContentDecode {
                    path: path.to_string(),
                    reason: format!("unsupported encoding '{other}'"),
                })
            }
        };

        Ok(FileContent {
            content,
            sha: self.sha,
        })
    }
}

/// Response of a successful `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentWriteResponse {
    pub commit: CommitObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitObject {
    pub sha: String,
}
