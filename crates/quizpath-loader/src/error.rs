//! Loader error types.

use quizpath_core::error::{FetchError, QuizError};
use thiserror::Error;

/// Terminal failures when loading a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Every fetch attempt failed.
    #[error("failed to load dataset from {location} after {attempts} attempt(s): {last}")]
    Exhausted {
        location: String,
        attempts: u32,
        #[source]
        last: FetchError,
    },

    /// The document was fetched but is not a valid dataset.
    #[error("dataset from {location} is malformed: {message}")]
    Malformed { location: String, message: String },

    /// The dataset parsed but references modules or archetypes it lacks.
    #[error("dataset from {location} is inconsistent: {source}")]
    Integrity {
        location: String,
        #[source]
        source: QuizError,
    },
}

impl LoadError {
    /// Returns `true` when the dataset was reachable but unusable.
    pub fn is_data_error(&self) -> bool {
        matches!(self, LoadError::Malformed { .. } | LoadError::Integrity { .. })
    }
}
