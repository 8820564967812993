//! Spec document handling
//!
//! A spec document is a markdown file whose checklist lines are the tasks.
//! Each task gets an identity derived from its text, not its position:
//! 1. Parse - find checklist lines and their indented detail lines
//! 2. Normalize - trim and collapse whitespace in the description
//! 3. Hash - truncated SHA-256 of the normalized description

mod hasher;
mod parser;

pub use hasher::{HASH_LEN, hash_text, is_task_hash, normalize};
pub use parser::{parse_spec, task_summary};
