//! Shared command context for CLI commands
//!
//! Gathers everything a run needs before any planning happens.

use crate::cli::style::{check, spinner_style};
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use taskchain::auth::get_github_auth;
use taskchain::capacity::CapacityGate;
use taskchain::config::{Config, ProjectConfig};
use taskchain::error::{Error, Result};
use taskchain::platform::{PlatformService, create_platform_service};
use taskchain::reconcile::ProjectSnapshot;
use taskchain::run::{ProjectPlan, plan_project};
use taskchain::spec::parse_spec;
use taskchain::types::PrRecord;

/// Shared context for CLI commands
///
/// Holds the config, the platform service (absent when PRs come from a
/// file), and one snapshot per configured project. Snapshots are built
/// fresh on every invocation from the spec documents and the live PR list.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Platform service (None in offline mode)
    pub platform: Option<Box<dyn PlatformService>>,
    /// One snapshot per configured project, in config order
    pub snapshots: Vec<ProjectSnapshot>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Load and validate config
    /// - Read open PRs from `prs_file`, or authenticate and list them
    /// - Parse every project's spec and reconcile
    pub async fn new(config_path: &Path, prs_file: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;

        let (platform, open_prs) = if let Some(path) = prs_file {
            (None, load_prs_file(path)?)
        } else {
            let auth = get_github_auth(config.github.host.as_deref()).await?;
            tracing::debug!(source = %auth.source, "authenticated");
            let platform = create_platform_service(&config, &auth.token)?;
            let prs = fetch_open_prs(platform.as_ref()).await?;
            (Some(platform), prs)
        };

        let mut snapshots = Vec::with_capacity(config.projects.len());
        for project in &config.projects {
            let tasks = read_tasks(&config, project)?;
            snapshots.push(ProjectSnapshot::build(
                &project.name,
                tasks,
                &open_prs,
                &config.namer(project),
            ));
        }

        Ok(Self {
            config,
            platform,
            snapshots,
        })
    }

    /// Platform service, or an error in offline mode
    pub fn platform(&self) -> Result<&dyn PlatformService> {
        self.platform.as_deref().ok_or_else(|| {
            Error::Config("this command needs GitHub access; drop --prs-file".to_string())
        })
    }

    /// Projects selected by `--project`, or all of them
    pub fn projects(&self, only: Option<&str>) -> Result<Vec<&ProjectConfig>> {
        match only {
            Some(name) => Ok(vec![self.config.require_project(name)?]),
            None => Ok(self.config.projects.iter().collect()),
        }
    }

    /// Plan one project against this run's snapshots
    pub fn plan(&self, project: &ProjectConfig) -> Result<ProjectPlan> {
        let snapshot = self.snapshot(&project.name)?;
        let capacity = CapacityGate::new(&self.config).evaluate(&project.name, &self.snapshots);
        Ok(plan_project(
            snapshot,
            project,
            capacity,
            &self.config.namer(project),
        ))
    }

    /// Snapshot for a project
    pub fn snapshot(&self, name: &str) -> Result<&ProjectSnapshot> {
        self.snapshots
            .iter()
            .find(|s| s.project == name)
            .ok_or_else(|| Error::ProjectNotFound(name.to_string()))
    }

    /// Path of a project's spec document
    pub fn spec_path(&self, project: &ProjectConfig) -> PathBuf {
        self.config.spec_path(project)
    }
}

/// Read and parse a project's spec document
fn read_tasks(config: &Config, project: &ProjectConfig) -> Result<Vec<taskchain::types::TaskRecord>> {
    let path = config.spec_path(project);
    let text = fs::read_to_string(&path).map_err(|e| {
        Error::Config(format!(
            "failed to read spec for project '{}' at {}: {e}",
            project.name,
            path.display()
        ))
    })?;
    parse_spec(&text, &path.display().to_string())
}

/// Open PRs from a JSON file (array of PR records)
fn load_prs_file(path: &Path) -> Result<Vec<PrRecord>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
    let prs: Vec<PrRecord> = serde_json::from_str(&content)?;
    tracing::debug!(count = prs.len(), path = %path.display(), "loaded PRs from file");
    Ok(prs)
}

/// List open PRs with a spinner
async fn fetch_open_prs(platform: &dyn PlatformService) -> Result<Vec<PrRecord>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Listing open PRs...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let prs = platform.list_open_prs().await;
    match &prs {
        Ok(list) => spinner.finish_with_message(format!("{} {} open PRs", check(), list.len())),
        Err(_) => spinner.finish_and_clear(),
    }
    prs
}
