//! HTTP request type definitions
//!
//! Every field is optional so that a missing field is reported through
//! translation with a specific message rather than as a generic body error.

use doc_courier_core::FileRequest;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// HTTP request to publish files onto a branch.
///
/// # Example
///
/// ```json
/// {
///   "fileUrls": [
///     { "url": "https://example.com/intro.mdx", "path": "docs/intro.mdx" }
///   ],
///   "branchName": "add-intro",
///   "githubToken": "ghp_...",
///   "owner": "kannwism",
///   "repo": "hh-docs",
///   "baseBranch": "main",
///   "commitMessage": "Add intro page"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFilesRequest {
    /// Files to download and where to put them
    pub file_urls: Option<Vec<FileRequest>>,

    /// Branch to commit to, created if missing
    pub branch_name: Option<String>,

    /// Token used for every GitHub call
    pub github_token: Option<String>,

    pub owner: Option<String>,

    pub repo: Option<String>,

    /// Branch the target branch is created from
    pub base_branch: Option<String>,

    /// Prefix of every commit message
    pub commit_message: Option<String>,
}
