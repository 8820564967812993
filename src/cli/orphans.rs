//! Orphans command - report PRs that no longer match any task

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, WARN};
use anstream::println;
use taskchain::error::Result;
use taskchain::run::warn_orphans;

/// Options for the orphans command
#[derive(Debug, Clone, Default)]
pub struct OrphanOptions {
    /// Post a warning comment on each orphaned PR
    pub comment: bool,
    /// Do not write comments
    pub dry_run: bool,
}

/// Run the orphans command
pub async fn run_orphans(
    ctx: &CommandContext,
    only: Option<&str>,
    options: OrphanOptions,
    json: bool,
) -> Result<()> {
    let mut report = Vec::new();
    for project in ctx.projects(only)? {
        let plan = ctx.plan(project)?;
        if options.comment && !plan.orphans.is_empty() {
            let result =
                warn_orphans(&plan.project, &plan.orphans, ctx.platform()?, options.dry_run)
                    .await?;
            tracing::debug!(
                project = %plan.project,
                created = result.created.len(),
                updated = result.updated.len(),
                unchanged = result.unchanged.len(),
                "orphan comments"
            );
        }
        report.push((plan.project, plan.orphans));
    }

    if json {
        let value: Vec<_> = report
            .iter()
            .map(|(project, orphans)| serde_json::json!({ "project": project, "orphans": orphans }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let total: usize = report.iter().map(|(_, o)| o.len()).sum();
    if total == 0 {
        println!("{}", "No orphaned PRs".muted());
        return Ok(());
    }

    for (project, orphans) in &report {
        for orphan in orphans {
            let reason = orphan
                .orphan_reason()
                .map_or_else(String::new, |r| r.to_string());
            println!(
                "{} {} PR #{} {} {}",
                WARN.warn(),
                project.emphasis(),
                orphan.pr.number.accent(),
                orphan.pr.branch_name,
                format!("({reason})").muted()
            );
        }
    }
    Ok(())
}
