//! # Strana Store
//!
//! Holds [`AnalyzedString`] records keyed by content hash and answers
//! structured and natural-language queries over them.
//!
//! ## Core Features
//!
//! - **Pluggable Backends**: storage sits behind the [`StoreBackend`] trait.
//!   The bundled [`InMemoryBackend`] keeps everything for the life of the
//!   process under a single lock.
//! - **Insert-if-absent**: a second record with the same id is refused with
//!   [`StoreError::Conflict`]; the check and the write are one atomic step.
//! - **Conjunctive filters**: [`FilterCriteria`] applies palindrome, length,
//!   word-count and contained-character predicates together.
//! - **Natural-language rules**: [`NaturalLanguageTranslator`] maps a fixed
//!   vocabulary of phrases onto [`FilterCriteria`].
//!
//! ## Example Usage
//!
//! ```
//! use analysis::analyze;
//! use store::{FilterCriteria, StringStore};
//!
//! let store = StringStore::new();
//! store.insert(analyze("racecar")).unwrap();
//! store.insert(analyze("hello world")).unwrap();
//!
//! let criteria = FilterCriteria {
//!     is_palindrome: Some(true),
//!     ..Default::default()
//! };
//! let outcome = store.filter(&criteria).unwrap();
//! assert_eq!(outcome.count, 1);
//! assert_eq!(outcome.data[0].value, "racecar");
//! ```

mod backend;
mod query;
mod translate;

pub use backend::{InMemoryBackend, StoreBackend};
pub use query::{FilterCriteria, FilterOutcome, QueryError};
pub use translate::{InterpretedQuery, NaturalLanguageOutcome, NaturalLanguageTranslator};

use analysis::AnalyzedString;
use thiserror::Error;

/// Errors raised by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("String already exists")]
    Conflict(String),
    #[error("String not found")]
    NotFound(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Shared store of analyzed strings.
///
/// Construct once at startup and hand out behind an `Arc`; all
/// synchronization lives in the backend.
pub struct StringStore {
    backend: Box<dyn StoreBackend>,
}

impl StringStore {
    /// Create a store over a fresh [`InMemoryBackend`].
    pub fn new() -> Self {
        Self::with_backend(Box::new(InMemoryBackend::new()))
    }

    /// Build a store with a custom backend.
    pub fn with_backend(backend: Box<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Store a record unless one with the same id exists.
    pub fn insert(&self, record: AnalyzedString) -> Result<AnalyzedString, StoreError> {
        let id = record.id.clone();
        if self.backend.insert_if_absent(&id, record.clone())? {
            tracing::info!(id = %id, length = record.properties.length, "stored string");
            Ok(record)
        } else {
            tracing::debug!(id = %id, "rejected duplicate string");
            Err(StoreError::Conflict(id))
        }
    }

    /// Fetch a record by id.
    pub fn get(&self, id: &str) -> Result<AnalyzedString, StoreError> {
        self.backend
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Every stored record, oldest first.
    pub fn list_all(&self) -> Result<Vec<AnalyzedString>, StoreError> {
        let mut records = Vec::new();
        self.backend.scan(&mut |record| {
            records.push(record.clone());
            Ok(())
        })?;
        Ok(records)
    }

    /// Remove a record by id.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.backend.remove(id)? {
            tracing::info!(id = %id, "deleted string");
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        self.backend.len()
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for StringStore {
    fn default() -> Self {
        Self::new()
    }
}
