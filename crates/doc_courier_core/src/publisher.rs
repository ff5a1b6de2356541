//! The publishing pipeline.
//!
//! [`Publisher::publish`] takes a validated [`PublishRequest`] through branch
//! setup, download, navigation update and commit, in that order. Only the
//! navigation update is allowed to fail without failing the request.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::join_all;
use github_client::{BranchCreation, FileCommit, FileContent, RepositoryClient};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    docs_files, download_all, merge_doc_entries, CourierError, CourierResult, DownloadedFile,
    FileFetcher, PublishRequest, DOCS_PREFIX, NAV_CONFIG_PATH,
};

#[cfg(test)]
#[path = "publisher_tests.rs"]
mod tests;

/// Source recorded for the generated navigation config.
pub const NAV_SOURCE_URL: &str = "internal://mkdocs-update";

/// A file written to the target branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResult {
    pub path: String,
    pub commit_sha: String,
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Branch the files were committed to
    pub branch: String,

    /// Committed paths, downloaded files first, then the navigation config if any
    pub files: Vec<String>,

    /// One entry per committed file, in the same order as `files`
    pub commits: Vec<CommitResult>,

    /// Whether the navigation config was rewritten and committed
    pub nav_updated: bool,
}

impl PublishOutcome {
    /// Summary line for the caller.
    pub fn message(&self) -> String {
        format!(
            "Successfully added {} files to branch {}",
            self.files.len(),
            self.branch
        )
    }

    pub fn commit_shas(&self) -> Vec<String> {
        self.commits.iter().map(|c| c.commit_sha.clone()).collect()
    }
}

/// Drives a publish against a repository client and a file source.
pub struct Publisher<'a> {
    client: &'a dyn RepositoryClient,
    fetcher: &'a dyn FileFetcher,
}

impl<'a> Publisher<'a> {
    pub fn new(client: &'a dyn RepositoryClient, fetcher: &'a dyn FileFetcher) -> Self {
        Self { client, fetcher }
    }

    /// Publishes every requested file onto the request's branch.
    ///
    /// The branch is created from the base branch unless it already exists.
    /// Files are only committed once all of them have been downloaded. When
    /// documentation pages are among them, `mkdocs.yml` is updated as well.
    ///
    /// # Errors
    ///
    /// - `CourierError::Repository` if the base branch cannot be resolved, the
    ///   branch cannot be created, or any commit fails
    /// - `CourierError::Download` if any file cannot be fetched
    ///
    /// Commits that succeeded before a failure are not undone.
    #[instrument(skip_all, fields(repository = %request.target(), branch = %request.branch()))]
    pub async fn publish(&self, request: &PublishRequest) -> CourierResult<PublishOutcome> {
        info!(
            file_count = request.files().len(),
            base_branch = %request.base_branch(),
            "Publishing files"
        );

        self.prepare_branch(request).await?;

        let mut files = download_all(self.fetcher, request.files()).await?;

        let nav_file = self.update_navigation(request, &files).await;
        let nav_updated = nav_file.is_some();
        files.extend(nav_file);

        let commits = self.commit_all(request, &files).await?;
        info!(commit_count = commits.len(), nav_updated, "All files committed");

        Ok(PublishOutcome {
            branch: request.branch().to_string(),
            files: files.into_iter().map(|file| file.path).collect(),
            commits,
            nav_updated,
        })
    }

    async fn prepare_branch(&self, request: &PublishRequest) -> CourierResult<()> {
        let target = request.target();

        let base_sha = self
            .client
            .get_branch_sha(&target.owner, &target.repo, request.base_branch())
            .await?;

        let creation = self
            .client
            .create_branch(&target.owner, &target.repo, request.branch(), &base_sha)
            .await?;

        match creation {
            BranchCreation::Created => info!(from_sha = %base_sha, "Created branch"),
            BranchCreation::AlreadyExists => info!("Reusing existing branch"),
        }
        Ok(())
    }

    /// Builds the updated navigation config, or `None` when there is nothing
    /// to add or the update failed.
    async fn update_navigation(
        &self,
        request: &PublishRequest,
        files: &[DownloadedFile],
    ) -> Option<DownloadedFile> {
        let pages = docs_files(files, DOCS_PREFIX);
        if pages.is_empty() {
            debug!("No documentation pages, leaving navigation alone");
            return None;
        }

        info!(page_count = pages.len(), "Updating {}", NAV_CONFIG_PATH);
        match self.build_nav_file(request, pages).await {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(error = %e, "Navigation update failed, committing files without it");
                None
            }
        }
    }

    async fn build_nav_file(
        &self,
        request: &PublishRequest,
        pages: Vec<&DownloadedFile>,
    ) -> CourierResult<DownloadedFile> {
        let (existing, sha) = self.read_nav_config(request).await?;

        let text = match &existing {
            Some(file) => Some(file.as_text().ok_or_else(|| {
                CourierError::nav_update(format!("{NAV_CONFIG_PATH} is not valid UTF-8"))
            })?),
            None => None,
        };

        let updated = merge_doc_entries(text, pages, DOCS_PREFIX)?;

        Ok(DownloadedFile {
            path: NAV_CONFIG_PATH.to_string(),
            content: STANDARD.encode(updated),
            source_url: NAV_SOURCE_URL.to_string(),
            original_path: NAV_CONFIG_PATH.to_string(),
            sha,
        })
    }

    /// Reads the navigation config from the target branch, falling back to the
    /// base branch.
    ///
    /// The returned SHA is only set when the file came from the target branch,
    /// since only that blob can be replaced there.
    async fn read_nav_config(
        &self,
        request: &PublishRequest,
    ) -> CourierResult<(Option<FileContent>, Option<String>)> {
        let target = request.target();

        if let Some(file) = self
            .client
            .get_file(&target.owner, &target.repo, NAV_CONFIG_PATH, request.branch())
            .await?
        {
            debug!(sha = %file.sha, "Found {} on target branch", NAV_CONFIG_PATH);
            let sha = file.sha.clone();
            return Ok((Some(file), Some(sha)));
        }

        let from_base = self
            .client
            .get_file(
                &target.owner,
                &target.repo,
                NAV_CONFIG_PATH,
                request.base_branch(),
            )
            .await?;

        if from_base.is_some() {
            debug!("Found {} on base branch", NAV_CONFIG_PATH);
        }
        Ok((from_base, None))
    }

    /// Commits every file concurrently.
    ///
    /// All commits run to completion even when one fails; the first failure in
    /// input order is returned.
    async fn commit_all(
        &self,
        request: &PublishRequest,
        files: &[DownloadedFile],
    ) -> CourierResult<Vec<CommitResult>> {
        info!("Committing {} files", files.len());

        let commits = files.iter().map(|file| self.commit_file(request, file));
        join_all(commits).await.into_iter().collect()
    }

    #[instrument(skip_all, fields(path = %file.path))]
    async fn commit_file(
        &self,
        request: &PublishRequest,
        file: &DownloadedFile,
    ) -> CourierResult<CommitResult> {
        let target = request.target();

        let sha = match &file.sha {
            Some(sha) => Some(sha.clone()),
            None => self.existing_sha(request, &file.path).await,
        };

        let commit = FileCommit {
            path: file.path.clone(),
            content: file.content.clone(),
            message: request.commit_message_for(&file.path),
            branch: request.branch().to_string(),
            sha,
        };

        let commit_sha = self
            .client
            .put_file(&target.owner, &target.repo, &commit)
            .await?;

        Ok(CommitResult {
            path: file.path.clone(),
            commit_sha,
        })
    }

    /// Looks up the current blob SHA of `path` on the target branch.
    ///
    /// Lookup failures are treated like a missing file.
    async fn existing_sha(&self, request: &PublishRequest, path: &str) -> Option<String> {
        let target = request.target();

        match self
            .client
            .get_file_sha(&target.owner, &target.repo, path, request.branch())
            .await
        {
            Ok(sha) => sha,
            Err(e) => {
                warn!(error = %e, "Could not look up existing file, treating it as new");
                None
            }
        }
    }
}
