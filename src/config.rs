//! Configuration loading and validation
//!
//! Config lives in a TOML file (default `taskchain.toml`). Everything is
//! validated at load time: an out-of-range limit is an error, never clamped.

use crate::branch::{BranchNamer, BranchScheme};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename
pub const CONFIG_FILE: &str = "taskchain.toml";

/// Maximum concurrent open PRs, always within `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "i64")]
pub struct Limit(u8);

impl Limit {
    /// Smallest allowed limit
    pub const MIN: u8 = 1;
    /// Largest allowed limit
    pub const MAX: u8 = 10;

    /// Limit value
    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<i64> for Limit {
    type Error = String;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(format!(
                "limit must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )),
        }
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository coordinates
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Base branch for task PRs
    #[serde(default = "default_base")]
    pub base: String,
    /// GitHub Enterprise host
    pub host: Option<String>,
}

/// One checklist-driven project
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name, used in branch names
    pub name: String,
    /// Spec document, relative to the config file
    pub spec: PathBuf,
    /// Concurrent open PR limit
    #[serde(default)]
    pub limit: Limit,
    /// Naming scheme for new branches
    #[serde(default)]
    pub scheme: BranchScheme,
    /// Reviewer logins, in assignment preference order
    #[serde(default)]
    pub reviewers: Vec<String>,
}

/// Per-reviewer settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewerConfig {
    /// Concurrent open PR limit across all projects
    #[serde(default)]
    pub limit: Limit,
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repository coordinates
    pub github: GitHubConfig,
    /// First component of every task branch
    #[serde(default = "default_prefix")]
    pub branch_prefix: String,
    /// Projects, each driven by one spec document
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    /// Reviewer limits by login
    #[serde(default)]
    pub reviewers: BTreeMap<String, ReviewerConfig>,
    /// Directory spec paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn default_base() -> String {
    "main".to_string()
}

fn default_prefix() -> String {
    "refactor".to_string()
}

impl Config {
    /// Load and validate config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        let mut config = Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(
            path = %path.display(),
            projects = config.projects.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parse and validate config text. Spec paths resolve against the
    /// current directory until `base_dir` is set.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.github.owner.trim().is_empty() || self.github.repo.trim().is_empty() {
            return Err("github.owner and github.repo must be set".to_string());
        }
        if self.branch_prefix.is_empty() || self.branch_prefix.contains(char::is_whitespace) {
            return Err(format!("invalid branch_prefix '{}'", self.branch_prefix));
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if !is_valid_name(&project.name) {
                return Err(format!(
                    "invalid project name '{}': use letters, digits, '-', '_' or '.'",
                    project.name
                ));
            }
            if !seen.insert(project.name.as_str()) {
                return Err(format!("duplicate project '{}'", project.name));
            }
            if project.reviewers.iter().any(|r| r.trim().is_empty()) {
                return Err(format!("project '{}' has an empty reviewer", project.name));
            }
        }
        Ok(())
    }

    /// Look up a project by name
    pub fn project(&self, name: &str) -> Option<&ProjectConfig> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Look up a project by name, failing if absent
    pub fn require_project(&self, name: &str) -> Result<&ProjectConfig> {
        self.project(name)
            .ok_or_else(|| Error::ProjectNotFound(name.to_string()))
    }

    /// Limit for a reviewer; unlisted reviewers get the minimum
    pub fn reviewer_limit(&self, login: &str) -> Limit {
        self.reviewers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(login))
            .map(|(_, r)| r.limit)
            .unwrap_or_default()
    }

    /// Branch namer for a project
    pub fn namer(&self, project: &ProjectConfig) -> BranchNamer {
        BranchNamer::new(&self.branch_prefix, &project.name)
    }

    /// Absolute-or-relative path to a project's spec document
    pub fn spec_path(&self, project: &ProjectConfig) -> PathBuf {
        self.base_dir.join(&project.spec)
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
