//! Path digests for history file names

use sha2::{Digest, Sha256};

/// SHA-256 of `input`, lowercase hex
pub fn path_digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
