//! Next command - select the next task and check its branch is unclaimed

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, arrow, check};
use anstream::println;
use taskchain::error::Result;
use taskchain::run::{Outcome, claim_next_task};

/// Run the next command
///
/// Prints one line per project. When GitHub is reachable the selected
/// branch is checked against the remote; an existing branch is an error.
pub async fn run_next(ctx: &CommandContext, only: Option<&str>, json: bool) -> Result<()> {
    let mut outcomes = Vec::new();
    for project in ctx.projects(only)? {
        let plan = ctx.plan(project)?;
        if let (Outcome::Start(next), Some(platform)) = (&plan.outcome, ctx.platform.as_deref()) {
            claim_next_task(next, platform).await?;
        }
        outcomes.push((project.name.clone(), plan.outcome));
    }

    if json {
        let report: Vec<_> = outcomes
            .iter()
            .map(|(project, outcome)| serde_json::json!({ "project": project, "result": outcome }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (project, outcome) in &outcomes {
        match outcome {
            Outcome::Start(next) => {
                println!(
                    "{} {} {} {}",
                    check(),
                    project.emphasis(),
                    arrow(),
                    next.branch.accent()
                );
                println!("    {}", next.task.normalized_text);
                if let Some(reviewer) = &next.reviewer {
                    println!("    {}", format!("reviewer: {reviewer}").muted());
                }
            }
            Outcome::AllDone => println!("{} {}", project.emphasis(), "all tasks done".success()),
            Outcome::AtCapacity { blocked } => {
                println!("{} {}", project.emphasis(), format!("no capacity: {blocked}").muted());
            }
            Outcome::AllInProgress => {
                println!("{} {}", project.emphasis(), "every open task has a PR".muted());
            }
        }
    }

    Ok(())
}
