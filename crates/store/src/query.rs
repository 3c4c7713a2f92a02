use crate::{StoreError, StringStore};
use analysis::AnalyzedString;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while validating or resolving a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Unable to parse natural language query: {0}")]
    Unparseable(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Optional, conjunctive filter criteria.
///
/// Absent criteria serialize as `null` so callers can see exactly which
/// filters were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_palindrome: Option<bool>,
    #[serde(default)]
    pub min_length: Option<i64>,
    #[serde(default)]
    pub max_length: Option<i64>,
    #[serde(default)]
    pub word_count: Option<i64>,
    #[serde(default)]
    pub contains_character: Option<String>,
}

/// Result of running criteria over the store.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome {
    pub data: Vec<AnalyzedString>,
    pub count: usize,
    pub filters_applied: FilterCriteria,
}

impl FilterCriteria {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check argument shapes before any record is touched.
    ///
    /// Returns the contained character, if one was requested.
    pub fn validate(&self) -> Result<Option<char>, QueryError> {
        match self.contains_character.as_deref() {
            None => Ok(None),
            Some(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Some(c)),
                    _ => Err(QueryError::InvalidArgument(
                        "contains_character must be a single character".to_string(),
                    )),
                }
            }
        }
    }

    /// Apply every present criterion, in a fixed order, as an AND.
    ///
    /// Does not validate; see [`validate`](Self::validate).
    pub fn matches(&self, record: &AnalyzedString) -> bool {
        let props = &record.properties;
        let length = props.length as i64;

        if let Some(want) = self.is_palindrome {
            if props.is_palindrome != want {
                return false;
            }
        }
        if let Some(min) = self.min_length {
            if length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return false;
            }
        }
        if let Some(count) = self.word_count {
            if props.word_count as i64 != count {
                return false;
            }
        }
        if let Some(ref needle) = self.contains_character {
            if !record.value.contains(needle.as_str()) {
                return false;
            }
        }
        true
    }

    /// Validate, then keep the matching records in their original order.
    pub fn apply(
        &self,
        mut records: Vec<AnalyzedString>,
    ) -> Result<Vec<AnalyzedString>, QueryError> {
        self.validate()?;
        records.retain(|record| self.matches(record));
        Ok(records)
    }
}

/// Accepts a JSON bool or the usual query-string spellings
/// (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`, `t`/`f`, `y`/`n`), any case.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Flag(bool);

    impl<'de> Deserialize<'de> for Flag {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(FlagVisitor)
        }
    }

    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = Flag;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
            Ok(Flag(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Flag, E> {
            match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "t" | "y" => Ok(Flag(true)),
                "false" | "0" | "no" | "off" | "f" | "n" => Ok(Flag(false)),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }

    Ok(Option::<Flag>::deserialize(deserializer)?.map(|Flag(v)| v))
}

/// Filtering over the whole store.
impl StringStore {
    /// Run `criteria` against every stored record.
    pub fn filter(&self, criteria: &FilterCriteria) -> Result<FilterOutcome, QueryError> {
        let data = criteria.apply(self.list_all()?)?;
        tracing::debug!(matched = data.len(), ?criteria, "filtered strings");
        Ok(FilterOutcome {
            count: data.len(),
            data,
            filters_applied: criteria.clone(),
        })
    }
}
