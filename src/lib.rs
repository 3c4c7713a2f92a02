//! Workspace umbrella crate for Strana, the string analyzer service.
//!
//! This crate stitches validation, analysis and storage together so callers
//! (the HTTP server, tests, embedding applications) can submit, look up,
//! filter and delete strings through a single API.
//!
//! ```
//! use strana::{submit_value, remove_value, StringStore};
//!
//! let store = StringStore::new();
//! let record = submit_value(&store, "racecar").unwrap();
//! assert!(record.properties.is_palindrome);
//!
//! remove_value(&store, "racecar").unwrap();
//! assert!(store.is_empty().unwrap());
//! ```

pub use analysis::{
    analyze, analyze_properties, character_frequency, hash_text, is_palindrome, length,
    timestamp_now, unique_character_count, validate_value, word_count, AnalysisError,
    AnalyzedString, CharacterFrequency, StringProperties,
};
pub use store::{
    FilterCriteria, FilterOutcome, InMemoryBackend, InterpretedQuery, NaturalLanguageOutcome,
    NaturalLanguageTranslator, QueryError, StoreBackend, StoreError, StringStore,
};

use std::error::Error;
use std::fmt;

/// Errors that can occur while moving a value through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Analysis(AnalysisError),
    Store(StoreError),
    Query(QueryError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Analysis(err) => write!(f, "{err}"),
            PipelineError::Store(err) => write!(f, "{err}"),
            PipelineError::Query(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Analysis(err) => Some(err),
            PipelineError::Store(err) => Some(err),
            PipelineError::Query(err) => Some(err),
        }
    }
}

impl From<AnalysisError> for PipelineError {
    fn from(value: AnalysisError) -> Self {
        PipelineError::Analysis(value)
    }
}

impl From<StoreError> for PipelineError {
    fn from(value: StoreError) -> Self {
        PipelineError::Store(value)
    }
}

impl From<QueryError> for PipelineError {
    fn from(value: QueryError) -> Self {
        match value {
            // Surface store failures under one variant regardless of the path taken.
            QueryError::Store(err) => PipelineError::Store(err),
            other => PipelineError::Query(other),
        }
    }
}

/// Validate, analyze and store `value`.
///
/// Fails with [`AnalysisError::EmptyValue`] for blank input and
/// [`StoreError::Conflict`] if the same value is already stored.
pub fn submit_value(store: &StringStore, value: &str) -> Result<AnalyzedString, PipelineError> {
    let value = validate_value(value).inspect_err(|_| {
        tracing::warn!("rejected empty value");
    })?;
    let record = analyze(value);
    Ok(store.insert(record)?)
}

/// Look up a stored record by its content hash.
pub fn fetch_by_id(store: &StringStore, id: &str) -> Result<AnalyzedString, PipelineError> {
    Ok(store.get(id)?)
}

/// Delete the record for a raw `value`, re-deriving its id from the content.
pub fn remove_value(store: &StringStore, value: &str) -> Result<(), PipelineError> {
    let id = hash_text(value);
    Ok(store.delete(&id)?)
}

/// Apply structured filter criteria to every stored record.
pub fn search(
    store: &StringStore,
    criteria: &FilterCriteria,
) -> Result<FilterOutcome, PipelineError> {
    Ok(store.filter(criteria)?)
}

/// Translate a free-text query and apply the resulting criteria.
pub fn search_natural_language(
    store: &StringStore,
    translator: &NaturalLanguageTranslator,
    query: &str,
) -> Result<NaturalLanguageOutcome, PipelineError> {
    Ok(store.filter_natural_language(translator, query)?)
}
