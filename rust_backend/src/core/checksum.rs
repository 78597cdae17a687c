//! Checksum calculation for emitted block lists.

use sha2::{Digest, Sha256};

use crate::core::domain::CanonicalBlock;

/// Calculate SHA-256 checksum of arbitrary text content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fingerprint of a block list, sensitive to block order and every field.
///
/// Callers compare fingerprints across imports to tell whether a re-run
/// changed the emitted schedule.
pub fn fingerprint_blocks(blocks: &[CanonicalBlock]) -> String {
    let mut hasher = Sha256::new();
    for block in blocks {
        let weeks: Vec<String> = block.weeks.iter().map(|w| w.to_string()).collect();
        let line = format!(
            "{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{}\n",
            block.course_name,
            block.teacher,
            block.location,
            block.weekday,
            block.sections,
            weeks.join(",")
        );
        hasher.update(line.as_bytes());
    }
    hex::encode(hasher.finalize())
}
