//! Run engine for one invocation
//!
//! Three-phase pattern:
//! 1. Gather - read spec documents and list open PRs (effectful, CLI layer)
//! 2. Plan - reconcile, gate and select into a `ProjectPlan` (pure, testable)
//! 3. Execute - claim the branch, open the PR, warn on orphans (effectful)

mod execute;
mod plan;

pub use execute::{
    ORPHAN_MARKER, OrphanWarnResult, TASK_MARKER, claim_next_task, open_task_pr, orphan_comment,
    pr_body, warn_orphans,
};
pub use plan::{NextTask, Outcome, ProjectPlan, plan_project};
