//! taskchain - turn a markdown checklist into a chain of single-task PRs
//!
//! Each checklist line in a project's spec document is a task. Tasks are
//! identified by a hash of their text, matched against open PRs through
//! their branch names, and started one at a time within per-project and
//! per-reviewer limits.

pub mod auth;
pub mod branch;
pub mod capacity;
pub mod config;
pub mod error;
pub mod migration;
pub mod platform;
pub mod reconcile;
pub mod run;
pub mod select;
pub mod spec;
pub mod types;
