//! Legacy command - report PRs still on index-based branch names

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow};
use anstream::println;
use taskchain::error::Result;
use taskchain::run::ProjectPlan;

/// Run the legacy command
pub fn run_legacy(ctx: &CommandContext, only: Option<&str>, json: bool) -> Result<()> {
    let plans: Vec<ProjectPlan> = ctx
        .projects(only)?
        .into_iter()
        .map(|p| ctx.plan(p))
        .collect::<Result<_>>()?;

    let total: usize = plans.iter().map(|p| p.legacy.len()).sum();

    if json {
        let value: Vec<_> = plans
            .iter()
            .map(|p| serde_json::json!({ "project": p.project, "legacy": p.legacy }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "count": total, "projects": value }))?
        );
        return Ok(());
    }

    if total == 0 {
        println!("{}", "No PRs use index-based branch names".muted());
        return Ok(());
    }

    println!(
        "{} PR(s) still use deprecated index-based branch names:",
        total.accent()
    );
    for plan in &plans {
        let project = ctx.config.require_project(&plan.project)?;
        let namer = ctx.config.namer(project);
        let snapshot = ctx.snapshot(&plan.project)?;

        for legacy in &plan.legacy {
            // Current legacy PRs can move to the hash name of the task they resolve to
            let target = snapshot
                .reconciled
                .iter()
                .find(|r| r.pr.number == legacy.pr.number)
                .and_then(|r| r.current_task())
                .map_or_else(
                    || "index out of range, close it".warn(),
                    |task| format!("rename to {}", namer.format_hash(&task.hash).accent()),
                );
            println!(
                "  {} {} PR #{} {} {}",
                arrow(),
                plan.project.emphasis(),
                legacy.pr.number.accent(),
                legacy.pr.branch_name,
                format!("({target})").muted()
            );
        }
    }
    Ok(())
}
