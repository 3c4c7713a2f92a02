//! Content hashing for analyzed strings.
//!
//! The content hash doubles as the storage key and as an exposed property, so
//! it must be stable across processes and machines.
//!
//! # Algorithm
//!
//! ```text
//! SHA-256(value_utf8_bytes) -> lowercase hex (64 chars)
//! ```
//!
//! No version prefix or discriminator byte is mixed in: the digest of
//! `"racecar"` here equals `sha256sum` of the same bytes.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const HASH_HEX_LEN: usize = 64;

/// Hash arbitrary text with SHA-256 and return a lowercase hex digest.
///
/// # Examples
///
/// ```rust
/// use analysis::hash_text;
///
/// let hash = hash_text("hello world");
/// assert_eq!(hash.len(), 64);
///
/// // Deterministic
/// assert_eq!(hash, hash_text("hello world"));
///
/// // Different inputs produce different hashes
/// assert_ne!(hash, hash_text("hello world!"));
/// ```
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
