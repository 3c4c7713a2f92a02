//! Derived properties of a single string.
//!
//! Every function here is pure and total: no I/O, no clock, no failure mode.
//! Characters are Unicode scalar values (`char`), so `"é"` written precomposed
//! counts as one character and decomposed as two.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::hash::hash_text;

/// Character -> occurrence count. Ordered so serialized output is stable.
pub type CharacterFrequency = BTreeMap<char, usize>;

/// The fixed set of properties computed for every stored string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of characters in the value.
    pub length: usize,
    /// Case- and space-insensitive palindrome check.
    pub is_palindrome: bool,
    /// Number of distinct characters, case-sensitive.
    pub unique_characters: usize,
    /// Number of whitespace-delimited tokens.
    pub word_count: usize,
    /// SHA-256 hex digest of the value; equal to the record id.
    pub sha256_hash: String,
    /// Occurrence count of every character, spaces and punctuation included.
    pub character_frequency_map: CharacterFrequency,
}

/// Count of characters in `value`.
pub fn length(value: &str) -> usize {
    value.chars().count()
}

/// Lowercase, drop every U+0020 space, then compare with the reversal.
///
/// Only the plain space is ignored; tabs, newlines and punctuation are
/// significant.
///
/// ```rust
/// use analysis::is_palindrome;
///
/// assert!(is_palindrome("racecar"));
/// assert!(is_palindrome("Never odd or even"));
/// assert!(!is_palindrome("hello"));
/// assert!(!is_palindrome("race car!"));
/// ```
pub fn is_palindrome(value: &str) -> bool {
    let cleaned: Vec<char> = value
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// Number of distinct characters; `'a'` and `'A'` are different.
pub fn unique_character_count(value: &str) -> usize {
    value.chars().collect::<HashSet<_>>().len()
}

/// Number of tokens after splitting on runs of whitespace.
///
/// ```rust
/// use analysis::word_count;
///
/// assert_eq!(word_count(""), 0);
/// assert_eq!(word_count("a b  c"), 3);
/// assert_eq!(word_count("  leading\tand\ntrailing  "), 3);
/// ```
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// Single pass over `value` counting each character.
pub fn character_frequency(value: &str) -> CharacterFrequency {
    let mut freq = CharacterFrequency::new();
    for c in value.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

/// Compute every property of `value`.
pub fn analyze_properties(value: &str) -> StringProperties {
    StringProperties {
        length: length(value),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_character_count(value),
        word_count: word_count(value),
        sha256_hash: hash_text(value),
        character_frequency_map: character_frequency(value),
    }
}
