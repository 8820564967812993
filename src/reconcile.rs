//! Matching open PRs to current tasks
//!
//! Pure: the caller fetches PRs and parses the spec, this module only
//! classifies. Orphans are values for the caller to report, not errors.

use crate::branch::{BranchNamer, Identifier};
use crate::types::{PrRecord, PrState, TaskRecord};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Why a PR's identifier resolved to no task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanReason {
    /// Hash suffix matches no task text
    HashMismatch,
    /// Legacy index outside `1..=tasks.len()`
    IndexOutOfRange,
}

impl std::fmt::Display for OrphanReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HashMismatch => write!(f, "no task has this hash (task text changed or removed)"),
            Self::IndexOutOfRange => write!(f, "legacy index is past the end of the checklist"),
        }
    }
}

/// Classification of one PR
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reconciliation {
    /// PR belongs to an existing task
    Current {
        /// The task the PR works on
        task: TaskRecord,
    },
    /// PR identifier parses but matches no task
    Orphaned {
        /// Why no task matched
        reason: OrphanReason,
    },
}

/// A PR together with its parsed identifier and classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledPr {
    /// The pull request
    pub pr: PrRecord,
    /// Identifier parsed from the head branch
    pub identifier: Identifier,
    /// Result of matching against the task list
    pub outcome: Reconciliation,
}

impl ReconciledPr {
    /// Task this PR is working on, if it is current
    pub const fn current_task(&self) -> Option<&TaskRecord> {
        match &self.outcome {
            Reconciliation::Current { task } => Some(task),
            Reconciliation::Orphaned { .. } => None,
        }
    }

    /// Orphan reason, if orphaned
    pub const fn orphan_reason(&self) -> Option<OrphanReason> {
        match &self.outcome {
            Reconciliation::Orphaned { reason } => Some(*reason),
            Reconciliation::Current { .. } => None,
        }
    }

    /// Current and bound to a task that is not yet checked off
    pub fn is_active(&self) -> bool {
        self.current_task().is_some_and(|t| !t.checked)
    }
}

/// Classify each open PR against the current task list.
///
/// Closed or merged PRs and branches that match neither naming scheme are
/// left out of the result. When several tasks share a hash the PR binds to
/// the earliest unchecked one, or the earliest one if all are checked.
pub fn reconcile(
    open_prs: &[PrRecord],
    tasks: &[TaskRecord],
    namer: &BranchNamer,
) -> Vec<ReconciledPr> {
    let mut by_hash: HashMap<&str, &TaskRecord> = HashMap::with_capacity(tasks.len());
    for task in tasks {
        by_hash
            .entry(task.hash.as_str())
            .and_modify(|bound| {
                if bound.checked && !task.checked {
                    *bound = task;
                }
            })
            .or_insert(task);
    }

    let mut results = Vec::new();
    for pr in open_prs {
        if pr.state != PrState::Open {
            debug!(pr_number = pr.number, state = %pr.state, "skipping non-open PR");
            continue;
        }

        let identifier = namer.parse(&pr.branch_name);
        let outcome = match &identifier {
            Identifier::Hash(h) => by_hash.get(h.as_str()).map_or(
                Reconciliation::Orphaned {
                    reason: OrphanReason::HashMismatch,
                },
                |task| Reconciliation::Current {
                    task: (*task).clone(),
                },
            ),
            Identifier::Index(i) => resolve_index(*i, tasks).map_or(
                Reconciliation::Orphaned {
                    reason: OrphanReason::IndexOutOfRange,
                },
                |task| Reconciliation::Current { task: task.clone() },
            ),
            Identifier::Unrecognized => {
                debug!(pr_number = pr.number, branch = %pr.branch_name, "ignoring unrecognized branch");
                continue;
            }
        };

        results.push(ReconciledPr {
            pr: pr.clone(),
            identifier,
            outcome,
        });
    }
    results
}

/// Task at 1-based legacy `index`, if within `1..=tasks.len()`
fn resolve_index(index: usize, tasks: &[TaskRecord]) -> Option<&TaskRecord> {
    if index == 0 || index > tasks.len() {
        return None;
    }
    tasks.iter().find(|t| t.source_order == index - 1)
}

/// One project's tasks and reconciled PRs, as of this run
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSnapshot {
    /// Project name
    pub project: String,
    /// Tasks parsed from the project's spec document
    pub tasks: Vec<TaskRecord>,
    /// Open PRs of this project that use one of our naming schemes
    pub reconciled: Vec<ReconciledPr>,
}

impl ProjectSnapshot {
    /// Reconcile `open_prs` against `tasks` for `project`
    pub fn build(
        project: &str,
        tasks: Vec<TaskRecord>,
        open_prs: &[PrRecord],
        namer: &BranchNamer,
    ) -> Self {
        let reconciled = reconcile(open_prs, &tasks, namer);
        Self {
            project: project.to_string(),
            tasks,
            reconciled,
        }
    }

    /// PRs that are current and bound to an unchecked task
    pub fn active(&self) -> impl Iterator<Item = &ReconciledPr> {
        self.reconciled.iter().filter(|r| r.is_active())
    }
}

/// Orphaned PRs out of a reconciliation result
pub fn orphans(results: &[ReconciledPr]) -> Vec<&ReconciledPr> {
    results
        .iter()
        .filter(|r| r.orphan_reason().is_some())
        .collect()
}
