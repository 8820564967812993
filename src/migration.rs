//! Legacy branch migration report
//!
//! Read-only: finds open PRs still named with the index scheme so an
//! operator can convert them by hand.

use crate::branch::{BranchNamer, Identifier};
use crate::types::{PrRecord, PrState};
use serde::Serialize;

/// An open PR still on an index-scheme branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyPr {
    /// The pull request
    pub pr: PrRecord,
    /// 1-based index parsed from the branch
    pub index: usize,
}

/// Open PRs whose branch uses the legacy index scheme
pub fn find_legacy_prs(open_prs: &[PrRecord], namer: &BranchNamer) -> Vec<LegacyPr> {
    open_prs
        .iter()
        .filter(|pr| pr.state == PrState::Open)
        .filter_map(|pr| match namer.parse(&pr.branch_name) {
            Identifier::Index(index) => Some(LegacyPr {
                pr: pr.clone(),
                index,
            }),
            Identifier::Hash(_) | Identifier::Unrecognized => None,
        })
        .collect()
}
