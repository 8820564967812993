//! Command-line surface

mod context;
mod legacy;
mod next;
mod open;
mod orphans;
mod status;
pub mod style;

use clap::{Parser, Subcommand};
use context::CommandContext;
use std::path::PathBuf;
use taskchain::config::CONFIG_FILE;
use taskchain::error::Result;

/// Turn a markdown checklist into a chain of single-task pull requests
#[derive(Debug, Parser)]
#[command(name = "taskchain", version, about)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Read open PRs from a JSON file instead of GitHub (read-only commands)
    #[arg(long, global = true, value_name = "PATH")]
    pub prs_file: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show task states, capacity, orphans and legacy PRs per project
    Status {
        /// Only this project
        #[arg(long)]
        project: Option<String>,
    },
    /// Select the next task per project and check its branch is unclaimed
    Next {
        /// Only this project
        #[arg(long)]
        project: Option<String>,
    },
    /// Open the PR for the selected task of a project
    Open {
        /// Project to open a PR for
        #[arg(long)]
        project: String,
        /// Open as draft
        #[arg(long)]
        draft: bool,
        /// Show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },
    /// List PRs that no longer match any task
    Orphans {
        /// Only this project
        #[arg(long)]
        project: Option<String>,
        /// Post a warning comment on each orphaned PR
        #[arg(long)]
        comment: bool,
        /// With --comment, show what would be posted without posting
        #[arg(long)]
        dry_run: bool,
    },
    /// List PRs still using index-based branch names
    Legacy {
        /// Only this project
        #[arg(long)]
        project: Option<String>,
    },
}

/// Run the parsed command
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = CommandContext::new(&cli.config, cli.prs_file.as_deref()).await?;

    match cli.command {
        Command::Status { project } => status::run_status(&ctx, project.as_deref(), cli.json),
        Command::Next { project } => next::run_next(&ctx, project.as_deref(), cli.json).await,
        Command::Open {
            project,
            draft,
            dry_run,
        } => {
            let options = open::OpenOptions { draft, dry_run };
            open::run_open(&ctx, &project, options, cli.json).await
        }
        Command::Orphans {
            project,
            comment,
            dry_run,
        } => {
            let options = orphans::OrphanOptions { comment, dry_run };
            orphans::run_orphans(&ctx, project.as_deref(), options, cli.json).await
        }
        Command::Legacy { project } => legacy::run_legacy(&ctx, project.as_deref(), cli.json),
    }
}
