//! Hashing - SHA-256 Output Digests
//!
//! Two runs over unchanged inputs must produce the same digest.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Whether `existing` holds exactly the document whose digest is `digest`.
pub fn matches_digest(existing: &[u8], digest: &str) -> bool {
    sha256_hex(existing) == digest
}

// We need hex encoding
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}
