//! Picking the next task to start
//!
//! Selection is document order and nothing else: the first task that is
//! neither checked nor already covered by a current PR.

use crate::capacity::Capacity;
use crate::reconcile::ReconciledPr;
use crate::types::TaskRecord;
use serde::Serialize;
use std::collections::HashSet;

/// Lifecycle of a task within one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Unchecked, no current PR
    Pending,
    /// Unchecked, a current PR exists
    InProgress,
    /// Checked off; terminal even if a PR still lingers
    Done,
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Source orders of tasks that have a current PR
fn in_progress_orders(results: &[ReconciledPr]) -> HashSet<usize> {
    results
        .iter()
        .filter_map(ReconciledPr::current_task)
        .map(|t| t.source_order)
        .collect()
}

/// State of every task, in task order
pub fn task_states(tasks: &[TaskRecord], results: &[ReconciledPr]) -> Vec<TaskState> {
    let busy = in_progress_orders(results);
    tasks
        .iter()
        .map(|task| {
            if task.checked {
                TaskState::Done
            } else if busy.contains(&task.source_order) {
                TaskState::InProgress
            } else {
                TaskState::Pending
            }
        })
        .collect()
}

/// First pending task in source order, or `None` when the project has no
/// capacity or nothing is pending. Callers tell those apart by looking at
/// the tasks.
pub fn select_next<'a>(
    tasks: &'a [TaskRecord],
    results: &[ReconciledPr],
    capacity: &Capacity,
) -> Option<&'a TaskRecord> {
    if !capacity.has_capacity() {
        return None;
    }
    let busy = in_progress_orders(results);

    let mut ordered: Vec<&TaskRecord> = tasks.iter().collect();
    ordered.sort_by_key(|t| t.source_order);
    ordered
        .into_iter()
        .find(|t| !t.checked && !busy.contains(&t.source_order))
}
