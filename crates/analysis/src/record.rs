//! The analyzed-string record and its construction.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::properties::{analyze_properties, StringProperties};

/// One analyzed string, keyed by the SHA-256 of its value.
///
/// Records are immutable once built; `id` always equals
/// `properties.sha256_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedString {
    /// Content hash of `value`; the primary key.
    pub id: String,
    /// The original input, byte-for-byte.
    pub value: String,
    /// Derived properties.
    pub properties: StringProperties,
    /// Insertion time, RFC 3339 in UTC with microsecond precision.
    pub created_at: String,
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`.
///
/// Fixed-width, so values sort lexically in time order.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Reject values that are empty or whitespace-only.
///
/// The returned slice is the untouched input; surrounding whitespace is
/// part of the value and is analyzed as-is.
pub fn validate_value(value: &str) -> Result<&str, AnalysisError> {
    if value.trim().is_empty() {
        return Err(AnalysisError::EmptyValue);
    }
    Ok(value)
}

/// Analyze `value` and stamp the result with the current time.
///
/// # Examples
///
/// ```rust
/// use analysis::{analyze, hash_text};
///
/// let record = analyze("racecar");
/// assert_eq!(record.id, hash_text("racecar"));
/// assert_eq!(record.properties.length, 7);
/// assert!(record.properties.is_palindrome);
/// assert_eq!(record.properties.word_count, 1);
/// ```
pub fn analyze(value: &str) -> AnalyzedString {
    let properties = analyze_properties(value);
    AnalyzedString {
        id: properties.sha256_hash.clone(),
        value: value.to_string(),
        properties,
        created_at: timestamp_now(),
    }
}
