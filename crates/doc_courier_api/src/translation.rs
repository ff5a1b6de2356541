//! Translation between HTTP types and domain types
//!
//! Requests are validated while they are translated. Checks run in a fixed
//! order (`fileUrls`, `branchName`, `githubToken`) and the first failure is
//! reported.

use doc_courier_core::{PublishOutcome, PublishRequest, RequestDefaults, ValidationError};

use crate::{
    errors::ApiError,
    models::{AddFilesRequest, AddFilesResponse},
};

#[cfg(test)]
#[path = "translation_tests.rs"]
mod tests;

/// A validated publish request and the token to run it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCommand {
    pub request: PublishRequest,
    pub token: String,
}

/// Convert HTTP AddFilesRequest to a domain PublishRequest.
///
/// Optional fields that are absent or blank take their value from `defaults`.
///
/// # Errors
///
/// Returns `ApiError::Validation` if:
/// - `fileUrls` is missing or empty
/// - `branchName` is missing or blank
/// - `githubToken` is missing or blank
pub fn http_add_files_request_to_domain(
    http_req: AddFilesRequest,
    defaults: &RequestDefaults,
) -> Result<PublishCommand, ApiError> {
    let files = http_req.file_urls.unwrap_or_default();
    let branch = http_req.branch_name.unwrap_or_default();

    let mut request = PublishRequest::new(files, branch, defaults)?;

    let token = non_blank(http_req.github_token)
        .ok_or_else(|| ValidationError::missing_field("githubToken"))?;

    let owner = non_blank(http_req.owner);
    let repo = non_blank(http_req.repo);
    if owner.is_some() || repo.is_some() {
        request = request.with_target(
            owner.unwrap_or_else(|| defaults.owner.clone()),
            repo.unwrap_or_else(|| defaults.repo.clone()),
        );
    }
    if let Some(base_branch) = non_blank(http_req.base_branch) {
        request = request.with_base_branch(base_branch);
    }
    if let Some(commit_message) = non_blank(http_req.commit_message) {
        request = request.with_commit_message(commit_message);
    }

    Ok(PublishCommand { request, token })
}

/// Convert a domain PublishOutcome to the HTTP response.
pub fn publish_outcome_to_http(outcome: PublishOutcome) -> AddFilesResponse {
    AddFilesResponse {
        success: true,
        message: outcome.message(),
        commits: outcome.commit_shas(),
        branch: outcome.branch,
        files: outcome.files,
        mkdocs_updated: outcome.nav_updated,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
