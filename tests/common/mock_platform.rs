//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use taskchain::error::{Error, Result};
use taskchain::platform::PlatformService;
use taskchain::types::{PlatformConfig, PrComment, PrRecord, PullRequest};

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: Option<String>,
    pub draft: bool,
}

/// Call record for `request_reviewers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReviewersCall {
    pub pr_number: u64,
    pub reviewers: Vec<String>,
}

/// Call record for `add_assignees`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAssigneesCall {
    pub pr_number: u64,
    pub assignees: Vec<String>,
}

/// Call record for `create_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Call record for `update_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentCall {
    pub comment_id: u64,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Auto-incrementing PR numbers
/// - Call tracking for verification
/// - Configurable open PRs, remote branches and comments
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    open_prs: Mutex<Vec<PrRecord>>,
    branches: Mutex<HashSet<String>>,
    comments: Mutex<HashMap<u64, Vec<PrComment>>>,
    // Call tracking
    branch_exists_calls: Mutex<Vec<String>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    request_reviewers_calls: Mutex<Vec<RequestReviewersCall>>,
    add_assignees_calls: Mutex<Vec<AddAssigneesCall>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    update_comment_calls: Mutex<Vec<UpdateCommentCall>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    error_on_add_assignees: Mutex<Option<String>>,
    error_on_request_reviewers: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_pr_number: AtomicU64::new(100),
            open_prs: Mutex::new(Vec::new()),
            branches: Mutex::new(HashSet::new()),
            comments: Mutex::new(HashMap::new()),
            branch_exists_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            request_reviewers_calls: Mutex::new(Vec::new()),
            add_assignees_calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            update_comment_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            error_on_add_assignees: Mutex::new(None),
            error_on_request_reviewers: Mutex::new(None),
        }
    }

    // === Setup methods ===

    /// Add an open PR (its head branch is also marked as existing)
    pub fn add_open_pr(&self, pr: PrRecord) {
        self.branches.lock().unwrap().insert(pr.branch_name.clone());
        self.open_prs.lock().unwrap().push(pr);
    }

    /// Mark a branch as existing on the remote
    pub fn add_branch(&self, branch: &str) {
        self.branches.lock().unwrap().insert(branch.to_string());
    }

    /// Seed comments for a PR
    pub fn set_comments(&self, pr_number: u64, comments: Vec<PrComment>) {
        self.comments.lock().unwrap().insert(pr_number, comments);
    }

    /// Simulate `login` submitting a review: GitHub drops them from the
    /// requested reviewers, assignees are untouched
    pub fn submit_review(&self, pr_number: u64, login: &str) {
        if let Some(pr) = self
            .open_prs
            .lock()
            .unwrap()
            .iter_mut()
            .find(|pr| pr.number == pr_number)
        {
            pr.reviewers.retain(|r| !r.eq_ignore_ascii_case(login));
        }
    }

    // === Error injection methods ===

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` return an error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `add_assignees` return an error
    pub fn fail_add_assignees(&self, msg: &str) {
        *self.error_on_add_assignees.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `request_reviewers` return an error
    pub fn fail_request_reviewers(&self, msg: &str) {
        *self.error_on_request_reviewers.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn get_branch_exists_calls(&self) -> Vec<String> {
        self.branch_exists_calls.lock().unwrap().clone()
    }

    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    pub fn get_request_reviewers_calls(&self) -> Vec<RequestReviewersCall> {
        self.request_reviewers_calls.lock().unwrap().clone()
    }

    pub fn get_add_assignees_calls(&self) -> Vec<AddAssigneesCall> {
        self.add_assignees_calls.lock().unwrap().clone()
    }

    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    pub fn get_update_comment_calls(&self) -> Vec<UpdateCommentCall> {
        self.update_comment_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self) -> Result<Vec<PrRecord>> {
        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn branch_exists(&self, branch: &str) -> Result<bool> {
        self.branch_exists_calls
            .lock()
            .unwrap()
            .push(branch.to_string());
        Ok(self.branches.lock().unwrap().contains(branch))
    }

    async fn find_existing_pr(&self, head_branch: &str) -> Result<Option<PullRequest>> {
        Ok(self
            .open_prs
            .lock()
            .unwrap()
            .iter()
            .find(|pr| pr.branch_name == head_branch)
            .map(|pr| PullRequest {
                number: pr.number,
                html_url: pr.html_url.clone(),
                base_ref: "main".to_string(),
                head_ref: pr.branch_name.clone(),
                title: pr.title.clone(),
                is_draft: false,
            }))
    }

    async fn create_pr_with_options(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
        draft: bool,
    ) -> Result<PullRequest> {
        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.map(String::from),
            draft,
        });

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let html_url = format!(
            "https://github.com/{}/{}/pull/{number}",
            self.config.owner, self.config.repo
        );
        let mut record = PrRecord::open(number, head);
        record.title = title.to_string();
        record.html_url = html_url.clone();
        self.open_prs.lock().unwrap().push(record);

        Ok(PullRequest {
            number,
            html_url,
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
            is_draft: draft,
        })
    }

    async fn request_reviewers(&self, pr_number: u64, reviewers: &[String]) -> Result<()> {
        if let Some(msg) = self.error_on_request_reviewers.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        self.request_reviewers_calls
            .lock()
            .unwrap()
            .push(RequestReviewersCall {
                pr_number,
                reviewers: reviewers.to_vec(),
            });
        if let Some(pr) = self
            .open_prs
            .lock()
            .unwrap()
            .iter_mut()
            .find(|pr| pr.number == pr_number)
        {
            pr.reviewers.extend_from_slice(reviewers);
        }
        Ok(())
    }

    async fn add_assignees(&self, pr_number: u64, assignees: &[String]) -> Result<()> {
        if let Some(msg) = self.error_on_add_assignees.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        self.add_assignees_calls.lock().unwrap().push(AddAssigneesCall {
            pr_number,
            assignees: assignees.to_vec(),
        });
        if let Some(pr) = self
            .open_prs
            .lock()
            .unwrap()
            .iter_mut()
            .find(|pr| pr.number == pr_number)
        {
            pr.assignees.extend_from_slice(assignees);
        }
        Ok(())
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                pr_number,
                body: body.to_string(),
            });
        let mut comments = self.comments.lock().unwrap();
        let list = comments.entry(pr_number).or_default();
        let id = 1000 + list.len() as u64;
        list.push(PrComment {
            id,
            body: body.to_string(),
        });
        Ok(())
    }

    async fn update_pr_comment(&self, pr_number: u64, comment_id: u64, body: &str) -> Result<()> {
        self.update_comment_calls
            .lock()
            .unwrap()
            .push(UpdateCommentCall {
                comment_id,
                body: body.to_string(),
            });
        if let Some(list) = self.comments.lock().unwrap().get_mut(&pr_number) {
            if let Some(c) = list.iter_mut().find(|c| c.id == comment_id) {
                c.body = body.to_string();
            }
        }
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
