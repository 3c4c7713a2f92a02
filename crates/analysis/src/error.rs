//! Error types produced by the analysis crate.
//!
//! Analysis itself is total over valid text; the only failure is rejecting a
//! value before it is analyzed at all.

use thiserror::Error;

/// Errors that can occur while validating a value for analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Value is empty or consists solely of whitespace.
    ///
    /// ```rust
    /// use analysis::AnalysisError;
    ///
    /// let err = AnalysisError::EmptyValue;
    /// assert_eq!(err.to_string(), "Missing or empty 'value' field");
    /// ```
    #[error("Missing or empty 'value' field")]
    EmptyValue,
}

impl AnalysisError {
    /// Returns a suggested HTTP status code for this error.
    ///
    /// ```rust
    /// use analysis::AnalysisError;
    ///
    /// assert_eq!(AnalysisError::EmptyValue.http_status_code(), 400);
    /// ```
    pub fn http_status_code(&self) -> u16 {
        match self {
            AnalysisError::EmptyValue => 400,
        }
    }
}
