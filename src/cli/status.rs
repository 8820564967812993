//! Status command - task states, capacity and PR health per project

use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, WARN};
use anstream::println;
use serde::Serialize;
use taskchain::error::Result;
use taskchain::reconcile::ProjectSnapshot;
use taskchain::run::{Outcome, ProjectPlan};
use taskchain::select::TaskState;
use taskchain::spec::task_summary;
use taskchain::types::TaskRecord;

#[derive(Serialize)]
struct TaskStatus<'a> {
    task: &'a TaskRecord,
    state: TaskState,
    pr: Option<u64>,
}

#[derive(Serialize)]
struct ProjectStatus<'a> {
    project: &'a str,
    spec: String,
    tasks: Vec<TaskStatus<'a>>,
    plan: &'a ProjectPlan,
}

/// PR number working on `task`, if any
fn pr_for(snapshot: &ProjectSnapshot, task: &TaskRecord) -> Option<u64> {
    snapshot
        .reconciled
        .iter()
        .find(|r| r.current_task().is_some_and(|t| t.source_order == task.source_order))
        .map(|r| r.pr.number)
}

/// Run the status command
pub fn run_status(ctx: &CommandContext, only: Option<&str>, json: bool) -> Result<()> {
    let mut plans = Vec::new();
    for project in ctx.projects(only)? {
        plans.push((project, ctx.plan(project)?, ctx.snapshot(&project.name)?));
    }

    if json {
        let report: Vec<ProjectStatus<'_>> = plans
            .iter()
            .map(|(project, plan, snapshot)| ProjectStatus {
                project: &project.name,
                spec: ctx.spec_path(project).display().to_string(),
                tasks: snapshot
                    .tasks
                    .iter()
                    .zip(&plan.states)
                    .map(|(task, state)| TaskStatus {
                        task,
                        state: *state,
                        pr: pr_for(snapshot, task),
                    })
                    .collect(),
                plan,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (project, plan, snapshot) in &plans {
        let (pending, in_progress, done) = plan.counts();
        println!(
            "{} {}",
            project.name.emphasis(),
            format!("({})", ctx.spec_path(project).display()).muted()
        );
        println!(
            "  {} done, {} in progress, {} pending; open PRs {}/{}",
            done.accent(),
            in_progress.accent(),
            pending.accent(),
            plan.capacity.project_open,
            plan.capacity.project_limit
        );

        for (task, state) in snapshot.tasks.iter().zip(&plan.states) {
            let summary = task_summary(task);
            match state {
                TaskState::Done => println!("  {} {}", CHECK.success(), summary.muted()),
                TaskState::InProgress => {
                    let pr = pr_for(snapshot, task).map_or_else(String::new, |n| format!(" #{n}"));
                    println!("  {} {}{}", "●".accent(), summary, pr.accent());
                }
                TaskState::Pending => println!("  {} {}", "○".muted(), summary),
            }
        }

        for orphan in &plan.orphans {
            println!(
                "  {} orphaned PR #{} ({})",
                WARN.warn(),
                orphan.pr.number,
                orphan.pr.branch_name
            );
        }
        if !plan.legacy.is_empty() {
            println!(
                "  {} {} PR(s) on deprecated index-based branches",
                WARN.warn(),
                plan.legacy.len()
            );
        }

        let next = match &plan.outcome {
            Outcome::Start(next) => format!("next: {}", next.branch.accent()),
            Outcome::AllDone => "all tasks done".success(),
            Outcome::AtCapacity { blocked } => format!("waiting: {blocked}").muted(),
            Outcome::AllInProgress => "every open task has a PR".muted(),
        };
        println!("  {next}");
        println!();
    }

    Ok(())
}
