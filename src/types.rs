//! Core types for taskchain

use serde::{Deserialize, Serialize};

/// One checklist entry from a spec document
///
/// Rebuilt from the document on every run; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRecord {
    /// Exact source line, including the checkbox marker
    pub raw_line: String,
    /// Description with list marker and checkbox removed, trimmed, internal
    /// whitespace runs collapsed. This is the hash input.
    pub normalized_text: String,
    /// 8-character lowercase hex identifier derived from `normalized_text`
    pub hash: String,
    /// `- [x]` vs `- [ ]`
    pub checked: bool,
    /// 0-based position among checklist lines in the document
    pub source_order: usize,
    /// 1-based line number in the document (reporting only)
    pub line_number: usize,
    /// Indented lines directly following the checklist line
    pub details: Vec<String>,
}

impl TaskRecord {
    /// 1-based legacy index used by index-scheme branch names
    pub const fn legacy_index(&self) -> usize {
        self.source_order + 1
    }
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    /// PR is open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// A pull request as seen by the reconciliation engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrRecord {
    /// PR number
    pub number: u64,
    /// Head branch name
    pub branch_name: String,
    /// Current state
    pub state: PrState,
    /// PR title
    #[serde(default)]
    pub title: String,
    /// Web URL for the PR
    #[serde(default)]
    pub html_url: String,
    /// Logins with a pending review request. GitHub drops a login from
    /// this list once that person submits a review.
    #[serde(default)]
    pub reviewers: Vec<String>,
    /// Logins assigned to the PR; the reviewer taskchain picked stays here
    /// after reviewing
    #[serde(default)]
    pub assignees: Vec<String>,
}

impl PrRecord {
    /// Build an open PR record with no reviewers
    pub fn open(number: u64, branch_name: impl Into<String>) -> Self {
        Self {
            number,
            branch_name: branch_name.into(),
            state: PrState::Open,
            title: String::new(),
            html_url: String::new(),
            reviewers: Vec::new(),
            assignees: Vec::new(),
        }
    }

    /// Attach requested reviewers
    #[must_use]
    pub fn with_reviewers<I, S>(mut self, reviewers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reviewers = reviewers.into_iter().map(Into::into).collect();
        self
    }

    /// Attach assignees
    #[must_use]
    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = assignees.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `login` is reviewing this PR: review still requested, or
    /// assigned
    pub fn has_reviewer(&self, login: &str) -> bool {
        self.reviewers
            .iter()
            .chain(&self.assignees)
            .any(|r| r.eq_ignore_ascii_case(login))
    }
}

/// A pull request created by taskchain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
    /// Whether PR is a draft
    pub is_draft: bool,
}

/// A comment on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrComment {
    /// Comment ID
    pub id: u64,
    /// Comment body text
    pub body: String,
}

/// Repository coordinates for the platform service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}
