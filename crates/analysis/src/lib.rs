//! Strana analysis layer.
//!
//! Turns a raw string into an [`AnalyzedString`]: a fixed set of derived
//! properties plus a content hash that serves as the record's identity.
//!
//! ## What we compute
//!
//! - Character length (Unicode scalar values, not bytes)
//! - Palindrome check, ignoring case and plain spaces
//! - Distinct character count, case-sensitive
//! - Whitespace-delimited word count
//! - SHA-256 content hash, lowercase hex
//! - Per-character frequency map
//!
//! ## Pure function guarantee
//!
//! Everything except [`analyze`] and [`timestamp_now`] is free of I/O and
//! clock calls. Same input, same properties, on any machine.

mod error;
mod hash;
mod properties;
mod record;

pub use crate::error::AnalysisError;
pub use crate::hash::{hash_text, HASH_HEX_LEN};
pub use crate::properties::{
    analyze_properties, character_frequency, is_palindrome, length, unique_character_count,
    word_count, CharacterFrequency, StringProperties,
};
pub use crate::record::{analyze, timestamp_now, validate_value, AnalyzedString};
