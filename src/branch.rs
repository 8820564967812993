//! Branch naming for task PRs
//!
//! Two schemes share the `{prefix}-{project}-` stem:
//! - hash (current): `{prefix}-{project}-{8-hex-hash}`
//! - index (legacy): `{prefix}-{project}-{source_order + 1}`
//!
//! Parsing checks the hash shape before the integer shape, so an all-digit
//! 8-character suffix such as `12345678` is a hash, never a legacy index.

use crate::spec::is_task_hash;
use crate::types::TaskRecord;
use serde::{Deserialize, Serialize};

/// Branch naming scheme for newly created PRs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchScheme {
    /// Content hash suffix
    #[default]
    Hash,
    /// 1-based position suffix (deprecated)
    Index,
}

impl std::fmt::Display for BranchScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash => write!(f, "hash"),
            Self::Index => write!(f, "index"),
        }
    }
}

/// Task identifier embedded in a branch name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Identifier {
    /// Hash-scheme suffix
    Hash(String),
    /// Legacy 1-based index suffix (not range-checked here)
    Index(usize),
    /// Not one of our branches
    Unrecognized,
}

/// Formats and parses branch names for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNamer {
    stem: String,
}

impl BranchNamer {
    /// Create a namer for `{prefix}-{project}-...` branches
    pub fn new(prefix: &str, project: &str) -> Self {
        Self {
            stem: format!("{prefix}-{project}-"),
        }
    }

    /// Branch name for `task` under `scheme`
    pub fn format(&self, task: &TaskRecord, scheme: BranchScheme) -> String {
        match scheme {
            BranchScheme::Hash => self.format_hash(&task.hash),
            BranchScheme::Index => self.format_index(task.legacy_index()),
        }
    }

    /// `{prefix}-{project}-{hash}`
    pub fn format_hash(&self, hash: &str) -> String {
        format!("{}{hash}", self.stem)
    }

    /// `{prefix}-{project}-{index}` with a 1-based index
    pub fn format_index(&self, index: usize) -> String {
        format!("{}{index}", self.stem)
    }

    /// Extract the task identifier from a branch name
    pub fn parse(&self, branch_name: &str) -> Identifier {
        let Some(suffix) = branch_name.strip_prefix(&self.stem) else {
            return Identifier::Unrecognized;
        };

        if is_task_hash(suffix) {
            return Identifier::Hash(suffix.to_string());
        }

        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            // Too large for usize can't be a real position either
            return suffix
                .parse()
                .map_or(Identifier::Unrecognized, Identifier::Index);
        }

        Identifier::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namer() -> BranchNamer {
        BranchNamer::new("refactor", "auth")
    }

    #[test]
    fn test_format_both_schemes() {
        let task = TaskRecord {
            raw_line: "- [ ] Add auth".to_string(),
            normalized_text: "Add auth".to_string(),
            hash: "73bc517e".to_string(),
            checked: false,
            source_order: 1,
            line_number: 3,
            details: vec![],
        };
        assert_eq!(
            namer().format(&task, BranchScheme::Hash),
            "refactor-auth-73bc517e"
        );
        assert_eq!(namer().format(&task, BranchScheme::Index), "refactor-auth-2");
    }

    #[test]
    fn test_parse_hash() {
        assert_eq!(
            namer().parse("refactor-auth-deadbeef"),
            Identifier::Hash("deadbeef".to_string())
        );
    }

    #[test]
    fn test_parse_eight_digit_suffix_is_hash() {
        assert_eq!(
            namer().parse("refactor-auth-12345678"),
            Identifier::Hash("12345678".to_string())
        );
    }

    #[test]
    fn test_parse_legacy_index() {
        assert_eq!(namer().parse("refactor-auth-2"), Identifier::Index(2));
        assert_eq!(namer().parse("refactor-auth-1234567"), Identifier::Index(1_234_567));
        assert_eq!(namer().parse("refactor-auth-0"), Identifier::Index(0));
    }

    #[test]
    fn test_parse_unrecognized() {
        let n = namer();
        for branch in [
            "main",
            "refactor-auth-",
            "refactor-auth-DEADBEEF",
            "refactor-auth-deadbeef0",
            "refactor-auth-12a",
            "refactor-auth--3",
            "refactor-auth-+3",
            "refactor-billing-deadbeef",
            "other-auth-deadbeef",
            "refactor-auth-v2-deadbeef",
            "refactor-auth-99999999999999999999999",
        ] {
            assert_eq!(n.parse(branch), Identifier::Unrecognized, "{branch}");
        }
    }

    #[test]
    fn test_hyphenated_project_names() {
        let n = BranchNamer::new("refactor", "auth-v2");
        assert_eq!(n.parse("refactor-auth-v2-3"), Identifier::Index(3));
        assert_eq!(namer().parse("refactor-auth-v2-3"), Identifier::Unrecognized);
    }

    #[test]
    fn test_scheme_serde_names() {
        assert_eq!(BranchScheme::default(), BranchScheme::Hash);
        assert_eq!(BranchScheme::Index.to_string(), "index");
    }
}
