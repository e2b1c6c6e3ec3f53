//! Checksum validation for migrations
//!
//! SHA-256 of each migration's SQL is recorded when it is applied and
//! compared on every later open, so an edited migration is caught.

use sha2::{Digest, Sha256};

/// Compute SHA256 checksum of a string
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
