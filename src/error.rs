//! Error types for taskchain
//!
//! Exit codes:
//! - 0: Success (including "nothing to start this run")
//! - 2: User error (bad config, spec without tasks, unknown project)
//! - 3: Idempotency guard tripped (branch or PR already exists)
//! - 4: Operation failed (GitHub API, IO)

use thiserror::Error;

/// Exit codes for the taskchain CLI
pub mod exit_codes {
    /// Invalid input or configuration
    pub const USER_ERROR: i32 = 2;
    /// Another run already claimed the work
    pub const ALREADY_CLAIMED: i32 = 3;
    /// External operation failed
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskchain operations
#[derive(Error, Debug)]
pub enum Error {
    /// The spec document contains no checklist lines at all
    #[error("no checklist tasks found in {0}")]
    NoTasksFound(String),

    /// Configuration is missing or invalid
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Project name is not present in the configuration
    #[error("project not configured: {0}")]
    ProjectNotFound(String),

    /// Target branch already exists on the remote
    #[error("branch '{0}' already exists; another run may have claimed this task")]
    BranchExists(String),

    /// An open PR already exists for the head branch
    #[error("PR #{number} is already open for branch '{branch}'")]
    PullRequestExists {
        /// Head branch name
        branch: String,
        /// Existing PR number
        number: u64,
    },

    /// PR was created but its reviewer could not be assigned
    #[error("PR #{number} was opened but assigning '{reviewer}' failed: {message}")]
    ReviewerAssignment {
        /// PR that was created
        number: u64,
        /// Reviewer taskchain picked
        reviewer: String,
        /// Underlying failure
        message: String,
    },

    /// No usable GitHub token
    #[error("authentication failed: {0}")]
    Auth(String),

    /// GitHub API error with context
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Error surfaced by octocrab
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NoTasksFound(_) | Self::Config(_) | Self::ProjectNotFound(_) | Self::Auth(_) => {
                exit_codes::USER_ERROR
            }
            Self::BranchExists(_) | Self::PullRequestExists { .. } => exit_codes::ALREADY_CLAIMED,
            Self::GitHubApi(_)
            | Self::ReviewerAssignment { .. }
            | Self::Octocrab(_)
            | Self::Io(_)
            | Self::Json(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for taskchain operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(
            Error::NoTasksFound("plan.md".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::Config("limit".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::BranchExists("refactor-auth-39b1209d".to_string()).exit_code(),
            exit_codes::ALREADY_CLAIMED
        );
        assert_eq!(
            Error::GitHubApi("boom".to_string()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }

    #[test]
    fn test_pull_request_exists_message() {
        let err = Error::PullRequestExists {
            branch: "refactor-auth-39b1209d".to_string(),
            number: 7,
        };
        assert_eq!(
            err.to_string(),
            "PR #7 is already open for branch 'refactor-auth-39b1209d'"
        );
    }
}
