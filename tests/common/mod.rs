//! Shared fixtures for integration and unit tests

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::MockPlatformService;

use taskchain::branch::BranchNamer;
use taskchain::capacity::CapacityGate;
use taskchain::config::Config;
use taskchain::reconcile::ProjectSnapshot;
use taskchain::run::{ProjectPlan, plan_project};
use taskchain::spec::parse_spec;
use taskchain::types::{PlatformConfig, PrRecord, TaskRecord};

/// The three-task plan used across scenarios
pub const THREE_TASKS: &str = "\
# Auth refactor

- [ ] Add user authentication
- [ ] Add input validation
- [ ] Update error messages
";

/// Single-project config, limit 1, no reviewers
pub const AUTH_CONFIG: &str = r#"
[github]
owner = "test"
repo = "repo"

[[projects]]
name = "auth"
spec = "auth.md"
"#;

pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

pub fn tasks(doc: &str) -> Vec<TaskRecord> {
    parse_spec(doc, "test.md").unwrap()
}

pub fn auth_namer() -> BranchNamer {
    BranchNamer::new("refactor", "auth")
}

/// Plan the `auth` project of `config_text` for `doc` and `prs`
pub fn plan_auth(config_text: &str, doc: &str, prs: &[PrRecord]) -> ProjectPlan {
    let config = Config::parse(config_text).unwrap();
    let project = config.project("auth").unwrap();
    let namer = config.namer(project);
    let snapshots = vec![ProjectSnapshot::build("auth", tasks(doc), prs, &namer)];
    let capacity = CapacityGate::new(&config).evaluate("auth", &snapshots);
    plan_project(&snapshots[0], project, capacity, &namer)
}
