//! Run planning - pure functions for deciding what a run should do
//!
//! No I/O happens here: the caller gathers the spec text and open PRs,
//! builds a `ProjectSnapshot`, evaluates capacity, and hands everything in.

use crate::branch::{BranchNamer, BranchScheme};
use crate::capacity::{Blocked, Capacity};
use crate::config::ProjectConfig;
use crate::migration::{LegacyPr, find_legacy_prs};
use crate::reconcile::{ProjectSnapshot, ReconciledPr, orphans};
use crate::select::{TaskState, select_next, task_states};
use crate::types::{PrRecord, TaskRecord};
use serde::Serialize;
use tracing::{info, warn};

/// The task to start this run, with everything the PR needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextTask {
    /// Project name
    pub project: String,
    /// Task to work on
    pub task: TaskRecord,
    /// Head branch for the PR
    pub branch: String,
    /// Scheme the branch was named with
    pub scheme: BranchScheme,
    /// Reviewer to request, if the project lists any
    pub reviewer: Option<String>,
}

/// What this run should do for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Start this task
    Start(NextTask),
    /// Every task is checked off
    AllDone,
    /// Pending tasks exist but no PR may be opened
    AtCapacity {
        /// Which limit blocked
        blocked: Blocked,
    },
    /// Capacity remains but every unchecked task already has a PR
    AllInProgress,
}

impl Outcome {
    /// The task to start, if any
    pub const fn next_task(&self) -> Option<&NextTask> {
        match self {
            Self::Start(next) => Some(next),
            Self::AllDone | Self::AtCapacity { .. } | Self::AllInProgress => None,
        }
    }
}

/// Plan for one project
///
/// Created by `plan_project()` (pure) and carried out by the functions in
/// `run::execute` (effectful).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPlan {
    /// Project name
    pub project: String,
    /// Selection result
    pub outcome: Outcome,
    /// Capacity the selection was made under
    pub capacity: Capacity,
    /// State of each task, in task order
    pub states: Vec<TaskState>,
    /// PRs whose identifier no longer matches a task
    pub orphans: Vec<ReconciledPr>,
    /// PRs still on index-scheme branches
    pub legacy: Vec<LegacyPr>,
}

impl ProjectPlan {
    /// Number of tasks in each state: (pending, in progress, done)
    pub fn counts(&self) -> (usize, usize, usize) {
        self.states
            .iter()
            .fold((0, 0, 0), |(p, i, d), state| match state {
                TaskState::Pending => (p + 1, i, d),
                TaskState::InProgress => (p, i + 1, d),
                TaskState::Done => (p, i, d + 1),
            })
    }
}

/// Create a plan for one project (PURE - no I/O)
///
/// # Arguments
/// * `snapshot` - Tasks and reconciled PRs for the project
/// * `project` - Project configuration (branch scheme)
/// * `capacity` - Capacity decision from `CapacityGate::evaluate`
/// * `namer` - Branch namer for the project
pub fn plan_project(
    snapshot: &ProjectSnapshot,
    project: &ProjectConfig,
    capacity: Capacity,
    namer: &BranchNamer,
) -> ProjectPlan {
    let tasks = &snapshot.tasks;
    let results = &snapshot.reconciled;

    let outcome = if tasks.iter().all(|t| t.checked) {
        Outcome::AllDone
    } else if let Some(blocked) = capacity.blocked {
        Outcome::AtCapacity { blocked }
    } else {
        select_next(tasks, results, &capacity).map_or(Outcome::AllInProgress, |task| {
            Outcome::Start(NextTask {
                project: project.name.clone(),
                task: task.clone(),
                branch: namer.format(task, project.scheme),
                scheme: project.scheme,
                reviewer: capacity.reviewer.clone(),
            })
        })
    };

    if let Outcome::Start(next) = &outcome {
        info!(
            project = %next.project,
            hash = %next.task.hash,
            branch = %next.branch,
            "selected task"
        );
    }

    let reconciled_prs: Vec<PrRecord> = results.iter().map(|r| r.pr.clone()).collect();
    let legacy = find_legacy_prs(&reconciled_prs, namer);
    for pr in &legacy {
        warn!(
            project = %project.name,
            pr_number = pr.pr.number,
            branch = %pr.pr.branch_name,
            "PR uses deprecated index-based branch name"
        );
    }

    ProjectPlan {
        project: project.name.clone(),
        outcome,
        states: task_states(tasks, results),
        orphans: orphans(results).into_iter().cloned().collect(),
        legacy,
        capacity,
    }
}
