//! Platform service for GitHub
//!
//! The reconciliation engine only ever sees `PrRecord`s; everything that
//! talks to the network goes through this trait so tests can swap in a mock.

mod github;

pub use github::GitHubService;

use crate::config::Config;
use crate::error::Result;
use crate::types::{PlatformConfig, PrComment, PrRecord, PullRequest};
use async_trait::async_trait;

/// Platform service trait for PR operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List every open PR in the repository (all pages)
    async fn list_open_prs(&self) -> Result<Vec<PrRecord>>;

    /// Whether a branch with exactly this name exists on the remote
    async fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Find an existing open PR for a head branch
    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>>;

    /// Create a new PR with default options (non-draft, no body).
    ///
    /// Delegates to [`create_pr_with_options`]. Implementors should
    /// override that method, not this one.
    ///
    /// [`create_pr_with_options`]: Self::create_pr_with_options
    async fn create_pr(&self, head: &str, base: &str, title: &str) -> Result<PullRequest> {
        self.create_pr_with_options(head, base, title, None, false)
            .await
    }

    /// Create a new PR with explicit body and draft options.
    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        draft: bool,
    ) -> Result<PullRequest>;

    /// Request reviews from the given logins
    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()>;

    /// Assign the PR to the given logins
    async fn add_assignees(&self, pr_number: u64, assignees: &[String]) -> Result<()>;

    /// List comments on a PR
    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>>;

    /// Create a comment on a PR
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Update an existing comment on a PR
    async fn update_pr_comment(&self, pr_number: u64, comment_id: u64, body: &str) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}

/// Build the GitHub service for a loaded config
pub fn create_platform_service(config: &Config, token: &str) -> Result<Box<dyn PlatformService>> {
    let service = GitHubService::new(
        token,
        config.github.owner.clone(),
        config.github.repo.clone(),
        config.github.host.clone(),
    )?;
    Ok(Box::new(service))
}
