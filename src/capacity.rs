//! Per-project and per-reviewer capacity
//!
//! Open counts are derived from this run's reconciliation, never cached.
//! Only current PRs bound to unchecked tasks count: orphans and unrelated
//! branches never consume capacity.

use crate::config::Config;
use crate::reconcile::ProjectSnapshot;
use serde::Serialize;

/// `open_count < limit`
pub const fn has_capacity(open_count: usize, limit: usize) -> bool {
    open_count < limit
}

/// Why a project cannot take another PR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Blocked {
    /// Project missing from configuration
    Unconfigured,
    /// No snapshot for the project, so the open count is unknown
    Unknown,
    /// Project is at its open PR limit
    ProjectLimit,
    /// Every listed reviewer is at their limit
    ReviewerLimit,
}

impl std::fmt::Display for Blocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "project is not configured"),
            Self::Unknown => write!(f, "open PR count is unknown"),
            Self::ProjectLimit => write!(f, "project is at its open PR limit"),
            Self::ReviewerLimit => write!(f, "all reviewers are at their limit"),
        }
    }
}

/// Capacity decision for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capacity {
    /// Active PRs counted against the project
    pub project_open: usize,
    /// Project limit
    pub project_limit: usize,
    /// Reviewer to request on the next PR
    pub reviewer: Option<String>,
    /// Set when no new PR may be opened
    pub blocked: Option<Blocked>,
}

impl Capacity {
    fn blocked(reason: Blocked, project_open: usize, project_limit: usize) -> Self {
        Self {
            project_open,
            project_limit,
            reviewer: None,
            blocked: Some(reason),
        }
    }

    /// Whether a new PR may be opened
    pub const fn has_capacity(&self) -> bool {
        self.blocked.is_none()
    }
}

/// Evaluates capacity against configured limits
#[derive(Debug, Clone, Copy)]
pub struct CapacityGate<'a> {
    config: &'a Config,
}

impl<'a> CapacityGate<'a> {
    /// Create a gate over `config`
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Active PRs of one project
    pub fn project_open_count(snapshot: &ProjectSnapshot) -> usize {
        snapshot.active().count()
    }

    /// Active PRs across all projects that request a review from `login`
    pub fn reviewer_open_count(login: &str, snapshots: &[ProjectSnapshot]) -> usize {
        snapshots
            .iter()
            .flat_map(ProjectSnapshot::active)
            .filter(|r| r.pr.has_reviewer(login))
            .count()
    }

    /// Decide whether `project` may receive a new PR.
    ///
    /// A project with reviewers needs at least one of them under their
    /// limit; the first such reviewer in configuration order is chosen.
    pub fn evaluate(&self, project: &str, snapshots: &[ProjectSnapshot]) -> Capacity {
        let Some(project_config) = self.config.project(project) else {
            return Capacity::blocked(Blocked::Unconfigured, 0, 0);
        };
        let limit = project_config.limit.get();

        let Some(snapshot) = snapshots.iter().find(|s| s.project == project) else {
            return Capacity::blocked(Blocked::Unknown, 0, limit);
        };

        let open = Self::project_open_count(snapshot);
        if !has_capacity(open, limit) {
            return Capacity::blocked(Blocked::ProjectLimit, open, limit);
        }

        if project_config.reviewers.is_empty() {
            return Capacity {
                project_open: open,
                project_limit: limit,
                reviewer: None,
                blocked: None,
            };
        }

        let reviewer = project_config.reviewers.iter().find(|login| {
            has_capacity(
                Self::reviewer_open_count(login, snapshots),
                self.config.reviewer_limit(login).get(),
            )
        });

        match reviewer {
            Some(login) => Capacity {
                project_open: open,
                project_limit: limit,
                reviewer: Some(login.clone()),
                blocked: None,
            },
            None => Capacity::blocked(Blocked::ReviewerLimit, open, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_spec;
    use crate::types::PrRecord;

    const CONFIG: &str = r#"
[github]
owner = "acme"
repo = "widgets"

[[projects]]
name = "auth"
spec = "auth.md"

[[projects]]
name = "billing"
spec = "billing.md"
limit = 3
reviewers = ["alice", "bob"]

[[projects]]
name = "search"
spec = "search.md"
limit = 2
reviewers = ["alice"]

[reviewers.alice]
limit = 2
"#;

    const PLAN: &str = "- [ ] First\n- [ ] Second\n- [x] Third\n- [ ] Fourth\n";

    fn snapshot(config: &Config, project: &str, prs: &[PrRecord]) -> ProjectSnapshot {
        let tasks = parse_spec(PLAN, "plan.md").unwrap();
        let namer = config.namer(config.project(project).unwrap());
        ProjectSnapshot::build(project, tasks, prs, &namer)
    }

    fn branch(config: &Config, project: &str, order: usize) -> String {
        let tasks = parse_spec(PLAN, "plan.md").unwrap();
        config
            .namer(config.project(project).unwrap())
            .format_hash(&tasks[order].hash)
    }

    #[test]
    fn test_has_capacity() {
        assert!(has_capacity(0, 1));
        assert!(!has_capacity(1, 1));
        assert!(has_capacity(2, 3));
    }

    #[test]
    fn test_limit_one_blocks_on_single_active_pr() {
        let config = Config::parse(CONFIG).unwrap();
        let prs = vec![PrRecord::open(1, branch(&config, "auth", 1))];
        let snapshots = vec![snapshot(&config, "auth", &prs)];

        let capacity = CapacityGate::new(&config).evaluate("auth", &snapshots);
        assert!(!capacity.has_capacity());
        assert_eq!(capacity.blocked, Some(Blocked::ProjectLimit));
        assert_eq!(capacity.project_open, 1);
    }

    #[test]
    fn test_orphans_and_unrelated_do_not_count() {
        let config = Config::parse(CONFIG).unwrap();
        let prs = vec![
            PrRecord::open(1, "refactor-auth-deadbeef"),
            PrRecord::open(2, "refactor-auth-9"),
            PrRecord::open(3, "dependabot/cargo/serde-1.0.200"),
        ];
        let snapshots = vec![snapshot(&config, "auth", &prs)];

        let capacity = CapacityGate::new(&config).evaluate("auth", &snapshots);
        assert!(capacity.has_capacity());
        assert_eq!(capacity.project_open, 0);
    }

    #[test]
    fn test_pr_for_checked_task_does_not_count() {
        let config = Config::parse(CONFIG).unwrap();
        let prs = vec![PrRecord::open(1, branch(&config, "auth", 2))];
        let snapshots = vec![snapshot(&config, "auth", &prs)];

        assert!(CapacityGate::new(&config).evaluate("auth", &snapshots).has_capacity());
    }

    #[test]
    fn test_unconfigured_project_has_no_capacity() {
        let config = Config::parse(CONFIG).unwrap();
        let capacity = CapacityGate::new(&config).evaluate("payments", &[]);
        assert_eq!(capacity.blocked, Some(Blocked::Unconfigured));
    }

    #[test]
    fn test_missing_snapshot_has_no_capacity() {
        let config = Config::parse(CONFIG).unwrap();
        let capacity = CapacityGate::new(&config).evaluate("auth", &[]);
        assert_eq!(capacity.blocked, Some(Blocked::Unknown));
    }

    #[test]
    fn test_first_reviewer_with_room_is_chosen() {
        let config = Config::parse(CONFIG).unwrap();
        let snapshots = vec![snapshot(&config, "billing", &[])];

        let capacity = CapacityGate::new(&config).evaluate("billing", &snapshots);
        assert_eq!(capacity.reviewer.as_deref(), Some("alice"));
    }

    #[test]
    fn test_reviewer_load_counts_across_projects() {
        let config = Config::parse(CONFIG).unwrap();
        // alice (limit 2) already reviews one billing PR and one search PR
        let billing_prs =
            vec![PrRecord::open(1, branch(&config, "billing", 0)).with_reviewers(["alice"])];
        let search_prs =
            vec![PrRecord::open(2, branch(&config, "search", 0)).with_reviewers(["Alice"])];
        let snapshots = vec![
            snapshot(&config, "billing", &billing_prs),
            snapshot(&config, "search", &search_prs),
        ];
        let gate = CapacityGate::new(&config);

        assert_eq!(CapacityGate::reviewer_open_count("alice", &snapshots), 2);
        let billing = gate.evaluate("billing", &snapshots);
        assert_eq!(billing.reviewer.as_deref(), Some("bob"));

        let search = gate.evaluate("search", &snapshots);
        assert_eq!(search.blocked, Some(Blocked::ReviewerLimit));
    }
}
