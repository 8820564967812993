//! Open command - create the PR for a project's selected task

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use taskchain::error::Result;
use taskchain::run::{Outcome, open_task_pr};

/// Options for the open command
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Open the PR as a draft
    pub draft: bool,
    /// Show what would be done without making changes
    pub dry_run: bool,
}

/// Run the open command
///
/// The head branch must already be pushed; this only creates the PR.
pub async fn run_open(
    ctx: &CommandContext,
    project: &str,
    options: OpenOptions,
    json: bool,
) -> Result<()> {
    let platform = ctx.platform()?;
    let project = ctx.config.require_project(project)?;
    let plan = ctx.plan(project)?;

    let Outcome::Start(next) = &plan.outcome else {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "result": plan.outcome }))?
            );
        } else {
            println!("{}", "Nothing to open for this project".muted());
        }
        return Ok(());
    };

    let pr = open_task_pr(
        next,
        platform,
        &ctx.config.github.base,
        options.draft,
        options.dry_run,
    )
    .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "task": next, "pr": pr }))?
        );
        return Ok(());
    }

    match pr {
        Some(pr) => println!(
            "{} Opened PR #{} for {}\n    {}",
            check(),
            pr.number.accent(),
            next.branch.accent(),
            pr.html_url
        ),
        None => println!(
            "{} would open PR {} {} {}",
            "Dry run:".muted(),
            next.branch.accent(),
            "←".muted(),
            next.task.normalized_text
        ),
    }
    Ok(())
}
