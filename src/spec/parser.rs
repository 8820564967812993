//! Checklist extraction from markdown

use super::hasher::{hash_text, normalize};
use crate::error::{Error, Result};
use crate::types::TaskRecord;
use regex::Regex;
use std::sync::LazyLock;

/// `- [ ] text` / `- [x] text` at the start of a line
static CHECKLIST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s+\[([ xX])\](.*)$").expect("checklist pattern is valid")
});

/// Parse every checklist line of a spec document into task records.
///
/// `source` names the document in the error when it has no tasks at all.
/// A document whose tasks are all checked is not an error.
pub fn parse_spec(text: &str, source: &str) -> Result<Vec<TaskRecord>> {
    let mut tasks: Vec<TaskRecord> = Vec::new();
    // Still collecting detail lines for the last task?
    let mut in_details = false;

    for (idx, line) in text.lines().enumerate() {
        if let Some(caps) = CHECKLIST_LINE.captures(line) {
            let checked = &caps[1] != " ";
            let normalized_text = normalize(&caps[2]);
            let hash = hash_text(&normalized_text);
            tasks.push(TaskRecord {
                raw_line: line.to_string(),
                normalized_text,
                hash,
                checked,
                source_order: tasks.len(),
                line_number: idx + 1,
                details: Vec::new(),
            });
            in_details = true;
            continue;
        }

        let indented = line.starts_with([' ', '\t']);
        if in_details && indented && !line.trim().is_empty() {
            if let Some(task) = tasks.last_mut() {
                task.details.push(line.trim().to_string());
            }
        } else {
            in_details = false;
        }
    }

    if tasks.is_empty() {
        return Err(Error::NoTasksFound(source.to_string()));
    }

    tracing::debug!(
        source,
        total = tasks.len(),
        done = tasks.iter().filter(|t| t.checked).count(),
        "parsed spec"
    );
    Ok(tasks)
}

/// One-line summary of a task for reports: first 72 chars of the text.
pub fn task_summary(task: &TaskRecord) -> String {
    const MAX: usize = 72;
    if task.normalized_text.chars().count() <= MAX {
        return task.normalized_text.clone();
    }
    let cut: String = task.normalized_text.chars().take(MAX - 1).collect();
    format!("{cut}…")
}
