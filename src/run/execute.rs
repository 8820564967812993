//! Run execution - effectful operations
//!
//! Takes the output of `plan_project` and talks to the platform. The
//! engine holds no locks, so concurrent runs are kept apart here: a claim
//! fails loudly if the branch already exists, and opening a PR fails if one
//! is already open for the branch. Nothing is ever overwritten.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::reconcile::ReconciledPr;
use crate::run::plan::NextTask;
use crate::types::PullRequest;
use tracing::{debug, info, warn};

/// Marker prefix embedded in task PR bodies
pub const TASK_MARKER: &str = "<!-- taskchain:task";

/// Marker identifying the orphan warning comment
pub const ORPHAN_MARKER: &str = "<!-- taskchain:orphan -->";

/// Verify no other run has claimed `next` by creating its branch.
///
/// Call before any work is done for the task; the branch itself is created
/// by git afterwards.
pub async fn claim_next_task(next: &NextTask, platform: &dyn PlatformService) -> Result<()> {
    if platform.branch_exists(&next.branch).await? {
        warn!(branch = %next.branch, "branch already exists, refusing to claim");
        return Err(Error::BranchExists(next.branch.clone()));
    }
    info!(
        project = %next.project,
        branch = %next.branch,
        hash = %next.task.hash,
        "claimed task"
    );
    Ok(())
}

/// PR body for a task: its detail lines plus a hidden marker
pub fn pr_body(next: &NextTask) -> String {
    let mut body = String::new();
    if !next.task.details.is_empty() {
        body.push_str(&next.task.details.join("\n"));
        body.push_str("\n\n");
    }
    body.push_str(&format!(
        "{TASK_MARKER} project={} hash={} -->",
        next.project, next.task.hash
    ));
    body
}

/// Open the PR for `next` against `base`.
///
/// Refuses if a PR is already open for the branch. In dry-run mode nothing
/// is written and `None` is returned.
pub async fn open_task_pr(
    next: &NextTask,
    platform: &dyn PlatformService,
    base: &str,
    draft: bool,
    dry_run: bool,
) -> Result<Option<PullRequest>> {
    if let Some(existing) = platform.find_existing_pr(&next.branch).await? {
        return Err(Error::PullRequestExists {
            branch: next.branch.clone(),
            number: existing.number,
        });
    }

    if dry_run {
        debug!(branch = %next.branch, "dry run, not creating PR");
        return Ok(None);
    }

    let body = pr_body(next);
    let pr = platform
        .create_pr_with_options(
            &next.branch,
            base,
            &next.task.normalized_text,
            Some(&body),
            draft,
        )
        .await?;

    if let Some(reviewer) = &next.reviewer {
        assign_reviewer(platform, pr.number, reviewer).await?;
    }

    info!(
        project = %next.project,
        pr_number = pr.number,
        branch = %next.branch,
        "opened task PR"
    );
    Ok(Some(pr))
}

/// Assign `reviewer` to a freshly opened PR and request their review.
///
/// Reviewer load is counted from assignees, so a failed assignment is an
/// error naming the PR. A failed review request only warns.
async fn assign_reviewer(
    platform: &dyn PlatformService,
    pr_number: u64,
    reviewer: &str,
) -> Result<()> {
    let logins = [reviewer.to_string()];
    platform
        .add_assignees(pr_number, &logins)
        .await
        .map_err(|e| Error::ReviewerAssignment {
            number: pr_number,
            reviewer: reviewer.to_string(),
            message: e.to_string(),
        })?;

    if let Err(e) = platform.request_reviewers(pr_number, &logins).await {
        warn!(pr_number, reviewer, error = %e, "review request failed, PR stays assigned");
    }
    Ok(())
}

/// Warning comment for an orphaned PR
pub fn orphan_comment(project: &str, orphan: &ReconciledPr) -> String {
    let reason = orphan
        .orphan_reason()
        .map_or_else(String::new, |r| r.to_string());
    format!(
        "{ORPHAN_MARKER}\n\
         ⚠️ This PR no longer matches any task in the `{project}` checklist: {reason}.\n\n\
         Branch `{}` does not count toward the project's open PR limit. \
         Close it, or restore the task text it was created for.",
        orphan.pr.branch_name
    )
}

/// What `warn_orphans` did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanWarnResult {
    /// PRs that got a new warning comment
    pub created: Vec<u64>,
    /// PRs whose warning comment was rewritten
    pub updated: Vec<u64>,
    /// PRs already carrying the current warning
    pub unchanged: Vec<u64>,
}

/// Post (or refresh) a warning comment on each orphaned PR.
///
/// One comment per PR, found again by its marker on later runs.
pub async fn warn_orphans(
    project: &str,
    orphans: &[ReconciledPr],
    platform: &dyn PlatformService,
    dry_run: bool,
) -> Result<OrphanWarnResult> {
    let mut result = OrphanWarnResult::default();

    for orphan in orphans {
        let number = orphan.pr.number;
        warn!(
            project,
            pr_number = number,
            branch = %orphan.pr.branch_name,
            reason = ?orphan.orphan_reason(),
            "orphaned PR"
        );

        let body = orphan_comment(project, orphan);
        let comments = platform.list_pr_comments(number).await?;
        let existing = comments.iter().find(|c| c.body.contains(ORPHAN_MARKER));

        match existing {
            Some(comment) if comment.body == body => result.unchanged.push(number),
            Some(comment) => {
                if !dry_run {
                    platform.update_pr_comment(number, comment.id, &body).await?;
                }
                result.updated.push(number);
            }
            None => {
                if !dry_run {
                    platform.create_pr_comment(number, &body).await?;
                }
                result.created.push(number);
            }
        }
    }

    Ok(result)
}
