//! Content fingerprinting.

use sha2::{Digest, Sha256};

/// SHA-256 of `text`, lowercase hex. Stable across processes and machines.
pub fn hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
