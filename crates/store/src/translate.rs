//! Natural-language query translation.
//!
//! Maps a free-text query onto [`FilterCriteria`] with a closed, ordered rule
//! table. There is no parsing beyond literal phrase checks and two regexes;
//! phrasing outside the table is rejected rather than guessed at.
//!
//! ## Rules (applied in order to the lowercased query)
//!
//! | # | Trigger | Effect |
//! |---|---------|--------|
//! | 1 | `palindrome` / `palindromic` | `is_palindrome = true` |
//! | 2 | `single word` / `one word` | `word_count = 1` |
//! | 3 | `longer than (\d+)` | `min_length = N + 1` |
//! | 4 | `letter ([a-z])` | `contains_character = <letter>` |
//! | 5 | `first vowel` | `contains_character = "a"` |
//!
//! Later effects overwrite earlier ones, so rule 5 wins over rule 4.
//!
//! ## Example Queries
//!
//! - "show me palindromes"
//! - "single word palindromic strings"
//! - "strings longer than 10 containing the letter z"

use crate::{FilterCriteria, QueryError, StringStore};
use analysis::AnalyzedString;
use regex::{Captures, Regex};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::num::IntErrorKind;

/// The query as understood by the translator.
#[derive(Debug, Clone, Serialize)]
pub struct InterpretedQuery {
    /// Query text exactly as received.
    pub original: String,
    /// Criteria derived from the query; only criteria that were set appear.
    #[serde(serialize_with = "serialize_present")]
    pub parsed_filters: FilterCriteria,
}

/// Filter results together with the interpretation that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct NaturalLanguageOutcome {
    pub data: Vec<AnalyzedString>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

enum Trigger {
    /// Fires when the query contains any of the phrases.
    Phrases(&'static [&'static str]),
    /// Fires on the first match; captures are passed to the effect.
    Pattern(Regex),
}

type Effect = fn(&mut FilterCriteria, Option<&Captures<'_>>) -> bool;

struct TranslationRule {
    name: &'static str,
    trigger: Trigger,
    /// Returns false when the trigger matched but nothing could be set.
    effect: Effect,
}

impl TranslationRule {
    fn apply(&self, lowered: &str, criteria: &mut FilterCriteria) -> bool {
        match &self.trigger {
            Trigger::Phrases(phrases) => {
                phrases.iter().any(|phrase| lowered.contains(phrase))
                    && (self.effect)(criteria, None)
            }
            Trigger::Pattern(regex) => match regex.captures(lowered) {
                Some(caps) => (self.effect)(criteria, Some(&caps)),
                None => false,
            },
        }
    }
}

/// Ordered keyword/regex rule table.
pub struct NaturalLanguageTranslator {
    rules: Vec<TranslationRule>,
}

impl NaturalLanguageTranslator {
    /// Create a translator with the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: Self::build_rules(),
        }
    }

    fn build_rules() -> Vec<TranslationRule> {
        vec![
            TranslationRule {
                name: "palindrome",
                trigger: Trigger::Phrases(&["palindrome", "palindromic"]),
                effect: |criteria, _| {
                    criteria.is_palindrome = Some(true);
                    true
                },
            },
            TranslationRule {
                name: "single_word",
                trigger: Trigger::Phrases(&["single word", "one word"]),
                effect: |criteria, _| {
                    criteria.word_count = Some(1);
                    true
                },
            },
            // "longer than N" is strict, hence N + 1.
            TranslationRule {
                name: "longer_than",
                trigger: Trigger::Pattern(
                    Regex::new(r"longer than (\d+)").expect("static pattern compiles"),
                ),
                // Bounds past i64 saturate; no stored length can reach them.
                effect: |criteria, caps| {
                    let parsed = match caps.and_then(|c| c.get(1)) {
                        Some(m) => m.as_str().parse::<i64>(),
                        None => return false,
                    };
                    let n = match parsed {
                        Ok(n) => n,
                        Err(err) if *err.kind() == IntErrorKind::PosOverflow => i64::MAX,
                        Err(_) => return false,
                    };
                    criteria.min_length = Some(n.saturating_add(1));
                    true
                },
            },
            TranslationRule {
                name: "letter",
                trigger: Trigger::Pattern(
                    Regex::new(r"letter ([a-z])").expect("static pattern compiles"),
                ),
                effect: |criteria, caps| match caps.and_then(|c| c.get(1)) {
                    Some(m) => {
                        criteria.contains_character = Some(m.as_str().to_string());
                        true
                    }
                    None => false,
                },
            },
            TranslationRule {
                name: "first_vowel",
                trigger: Trigger::Phrases(&["first vowel"]),
                effect: |criteria, _| {
                    criteria.contains_character = Some("a".to_string());
                    true
                },
            },
        ]
    }

    /// Translate `query` into filter criteria.
    ///
    /// Fails with [`QueryError::Unparseable`] when no rule fires.
    pub fn translate(&self, query: &str) -> Result<FilterCriteria, QueryError> {
        let lowered = query.to_lowercase();
        let mut criteria = FilterCriteria::default();
        let mut fired = Vec::new();

        for rule in &self.rules {
            if rule.apply(&lowered, &mut criteria) {
                fired.push(rule.name);
            }
        }

        if fired.is_empty() {
            tracing::warn!(query, "no translation rule matched");
            return Err(QueryError::Unparseable(query.to_string()));
        }

        tracing::debug!(query, rules = ?fired, "translated natural language query");
        Ok(criteria)
    }

    /// Translate `query` and keep the original text alongside the result.
    pub fn interpret(&self, query: &str) -> Result<InterpretedQuery, QueryError> {
        Ok(InterpretedQuery {
            original: query.to_string(),
            parsed_filters: self.translate(query)?,
        })
    }
}

impl Default for NaturalLanguageTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringStore {
    /// Interpret `query` with `translator`, then filter the store with the result.
    pub fn filter_natural_language(
        &self,
        translator: &NaturalLanguageTranslator,
        query: &str,
    ) -> Result<NaturalLanguageOutcome, QueryError> {
        let interpreted_query = translator.interpret(query)?;
        let outcome = self.filter(&interpreted_query.parsed_filters)?;
        Ok(NaturalLanguageOutcome {
            data: outcome.data,
            count: outcome.count,
            interpreted_query,
        })
    }
}

fn serialize_present<S>(criteria: &FilterCriteria, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(None)?;
    if let Some(v) = criteria.is_palindrome {
        map.serialize_entry("is_palindrome", &v)?;
    }
    if let Some(v) = criteria.min_length {
        map.serialize_entry("min_length", &v)?;
    }
    if let Some(v) = criteria.max_length {
        map.serialize_entry("max_length", &v)?;
    }
    if let Some(v) = criteria.word_count {
        map.serialize_entry("word_count", &v)?;
    }
    if let Some(ref v) = criteria.contains_character {
        map.serialize_entry("contains_character", v)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis::analyze;
    use serde_json::json;

    fn translate(query: &str) -> Result<FilterCriteria, QueryError> {
        NaturalLanguageTranslator::new().translate(query)
    }

    #[test]
    fn palindrome_keywords() {
        let expected = FilterCriteria {
            is_palindrome: Some(true),
            ..Default::default()
        };
        assert_eq!(translate("show me palindromes").unwrap(), expected);
        assert_eq!(translate("All PALINDROMIC strings").unwrap(), expected);
    }

    #[test]
    fn longer_than_is_strict() {
        let criteria = translate("strings longer than 5").unwrap();
        assert_eq!(
            criteria,
            FilterCriteria {
                min_length: Some(6),
                ..Default::default()
            }
        );
    }

    #[test]
    fn overflowing_bound_saturates() {
        let criteria = translate("longer than 99999999999999999999").unwrap();
        assert_eq!(criteria.min_length, Some(i64::MAX));

        let criteria = translate("longer than 9223372036854775807").unwrap();
        assert_eq!(criteria.min_length, Some(i64::MAX));
    }

    #[test]
    fn overflowing_bound_matches_nothing() {
        let store = StringStore::new();
        store.insert(analyze("a fairly long string")).unwrap();
        let outcome = store
            .filter_natural_language(
                &NaturalLanguageTranslator::new(),
                "strings longer than 99999999999999999999",
            )
            .unwrap();
        assert_eq!(outcome.count, 0);
    }

    #[test]
    fn rules_combine() {
        let criteria = translate("single word palindromic strings longer than 2").unwrap();
        assert_eq!(criteria.is_palindrome, Some(true));
        assert_eq!(criteria.word_count, Some(1));
        assert_eq!(criteria.min_length, Some(3));
        assert_eq!(criteria.contains_character, None);
    }

    #[test]
    fn letter_rule_captures_lowercased_letter() {
        let criteria = translate("strings containing the Letter Z").unwrap();
        assert_eq!(criteria.contains_character.as_deref(), Some("z"));
    }

    #[test]
    fn first_vowel_overrides_letter() {
        let criteria = translate("letter z and the first vowel").unwrap();
        assert_eq!(criteria.contains_character.as_deref(), Some("a"));
    }

    #[test]
    fn unmatched_query_is_unparseable() {
        let err = translate("gibberish xyz").unwrap_err();
        assert_eq!(err, QueryError::Unparseable("gibberish xyz".to_string()));
        assert!(translate("").is_err());
    }

    #[test]
    fn interpreted_query_lists_only_set_filters() {
        let interpreted = NaturalLanguageTranslator::new()
            .interpret("Show me palindromes")
            .unwrap();
        let json = serde_json::to_value(&interpreted).unwrap();
        assert_eq!(
            json,
            json!({
                "original": "Show me palindromes",
                "parsed_filters": { "is_palindrome": true }
            })
        );
    }

    #[test]
    fn store_filters_with_translated_criteria() {
        let store = StringStore::new();
        for value in ["racecar", "noon", "hello", "a toyota"] {
            store.insert(analyze(value)).unwrap();
        }
        let translator = NaturalLanguageTranslator::new();
        let outcome = store
            .filter_natural_language(&translator, "single word palindromes")
            .unwrap();
        let values: Vec<&str> = outcome.data.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["racecar", "noon"]);
        assert_eq!(outcome.count, 2);
        assert_eq!(outcome.interpreted_query.original, "single word palindromes");
    }
}
