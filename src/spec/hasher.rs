//! Stable task identifiers

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest
pub const HASH_LEN: usize = 8;

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hash already-normalized task text.
///
/// Case sensitive and whitespace sensitive: callers normalize first. The
/// 8-character truncation keeps branch names readable; collisions between
/// distinct texts are possible and not detected.
pub fn hash_text(normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..HASH_LEN].to_string()
}

/// Whether `s` has the shape of a task hash (exactly 8 lowercase hex chars).
pub fn is_task_hash(s: &str) -> bool {
    s.len() == HASH_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
