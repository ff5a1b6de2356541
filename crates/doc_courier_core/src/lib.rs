//! # Doc Courier Core
//!
//! Publishes remote files onto a branch of a GitHub repository and keeps the
//! MkDocs navigation of that repository in step.
//!
//! ## Overview
//!
//! A publish runs these steps in order:
//! 1. Resolve the base branch and create the target branch from it (an existing
//!    branch is reused)
//! 2. Download every source file concurrently, renaming `docs/**/*.mdx` to `.md`
//! 3. Add any new documentation pages to `mkdocs.yml`
//! 4. Commit every file, plus the navigation config, concurrently
//!
//! A navigation failure is logged and skipped. Every other failure aborts the
//! publish; commits that already landed stay in place.
//!
//! ## Examples
//!
//! ```no_run
//! use doc_courier_core::{FileRequest, HttpFileFetcher, PublishRequest, Publisher, RequestDefaults};
//! use github_client::{create_token_client, GitHubClient, DEFAULT_API_BASE};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = PublishRequest::new(
//!     vec![FileRequest::new("https://example.com/intro.mdx", "docs/intro.mdx")],
//!     "add-intro",
//!     &RequestDefaults::default(),
//! )?;
//!
//! let client = GitHubClient::new(create_token_client("ghp_example", DEFAULT_API_BASE)?);
//! let fetcher = HttpFileFetcher::default();
//!
//! let outcome = Publisher::new(&client, &fetcher).publish(&request).await?;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

mod errors;
pub use errors::{CourierError, CourierResult, ValidationError};

/// Publish request types and defaults
pub mod request;
pub use request::{
    FileRequest, PublishRequest, RepositoryTarget, RequestDefaults, DEFAULT_BASE_BRANCH,
    DEFAULT_COMMIT_MESSAGE, DEFAULT_OWNER, DEFAULT_REPO,
};

/// Downloading and path rewriting
pub mod files;
pub use files::{
    docs_files, download_all, is_doc_page, rewrite_doc_path, DownloadedFile, FileFetcher,
    HttpFileFetcher, DOCS_PREFIX,
};

/// MkDocs navigation merging
pub mod nav;
pub use nav::{derive_title, merge_doc_entries, NavConfig, NavItem, NAV_CONFIG_PATH};

/// The publishing pipeline
pub mod publisher;
pub use publisher::{CommitResult, PublishOutcome, Publisher};
