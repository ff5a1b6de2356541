//! Downloading source files.
//!
//! Every [`FileRequest`] is fetched in full and turned into a
//! [`DownloadedFile`] whose content is base64-encoded, ready for the
//! Contents API. MDX documents under `docs/` are renamed to `.md` on the way.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use tracing::{debug, info, instrument};

use crate::{CourierError, CourierResult, FileRequest};

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;

/// Repository directory holding the site's documentation sources.
pub const DOCS_PREFIX: &str = "docs/";

/// A fetched file, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// Path the file is committed to
    pub path: String,

    /// Base64-encoded content
    pub content: String,

    /// Where the content came from
    pub source_url: String,

    /// Destination path as requested, before any rewrite
    pub original_path: String,

    /// Blob SHA of the file on the target branch, when already known
    pub sha: Option<String>,
}

/// Source of file bytes.
///
/// Abstracted so the publishing pipeline can be exercised without a network.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Fetches the full content behind `url`.
    ///
    /// # Errors
    ///
    /// Returns `CourierError::Download` when the source cannot be reached or
    /// answers with a non-success status.
    async fn fetch(&self, url: &str) -> CourierResult<Vec<u8>>;
}

/// [`FileFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpFileFetcher {
    client: reqwest::Client,
}

impl HttpFileFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FileFetcher for HttpFileFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> CourierResult<Vec<u8>> {
        let download_error = |reason: String| CourierError::Download {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(download_error(status.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        debug!(size = bytes.len(), "Downloaded file");
        Ok(bytes.to_vec())
    }
}

/// Rewrites a destination path for the documentation site.
///
/// `docs/**/*.mdx` becomes `docs/**/*.md`; every other path is returned unchanged.
///
/// # Examples
///
/// ```
/// use doc_courier_core::rewrite_doc_path;
///
/// assert_eq!(rewrite_doc_path("docs/guide/intro.mdx"), "docs/guide/intro.md");
/// assert_eq!(rewrite_doc_path("blog/post.mdx"), "blog/post.mdx");
/// ```
pub fn rewrite_doc_path(path: &str) -> String {
    if path.starts_with(DOCS_PREFIX) {
        if let Some(stem) = path.strip_suffix(".mdx") {
            return format!("{stem}.md");
        }
    }
    path.to_string()
}

/// Whether `path` is a Markdown page under `docs_prefix`.
pub fn is_doc_page(path: &str, docs_prefix: &str) -> bool {
    path.starts_with(docs_prefix) && path.ends_with(".md")
}

/// Selects the downloaded files that are Markdown pages under `docs_prefix`.
pub fn docs_files<'a>(files: &'a [DownloadedFile], docs_prefix: &str) -> Vec<&'a DownloadedFile> {
    files
        .iter()
        .filter(|file| is_doc_page(&file.path, docs_prefix))
        .collect()
}

/// Downloads every requested file concurrently.
///
/// All requests are in flight at once with no cap. The first failure aborts
/// the whole batch and no partial result is returned.
///
/// # Errors
///
/// Returns the first `CourierError::Download` raised by `fetcher`.
#[instrument(skip_all, fields(file_count = requests.len()))]
pub async fn download_all(
    fetcher: &dyn FileFetcher,
    requests: &[FileRequest],
) -> CourierResult<Vec<DownloadedFile>> {
    info!("Downloading {} files", requests.len());

    let downloads = requests.iter().map(|request| async move {
        let bytes = fetcher.fetch(&request.url).await?;

        let path = rewrite_doc_path(&request.path);
        if path != request.path {
            info!(from = %request.path, to = %path, "Converting MDX document to Markdown");
        }

        Ok::<_, CourierError>(DownloadedFile {
            path,
            content: STANDARD.encode(&bytes),
            source_url: request.url.clone(),
            original_path: request.path.clone(),
            sha: None,
        })
    });

    let files = try_join_all(downloads).await?;
    info!("Successfully downloaded all files");

    Ok(files)
}
