//! Core error types.
//!
//! Data integrity errors mean the dataset loaded but is internally
//! inconsistent. Sequencing errors mean the caller drove the session out of
//! order; they indicate a control-flow bug, never bad user input.
//!
//! `FetchError` is defined here rather than in the loader so that
//! `DatasetSource` implementations and the retry loop share one type.

use thiserror::Error;

use crate::model::ModuleId;

/// Errors raised by the session, controller, and recommendation engine.
#[derive(Debug, Error, PartialEq)]
pub enum QuizError {
    /// A question tag references a module the dataset does not define.
    #[error("question '{question_id}' is tagged with unknown module {module_id}")]
    UnknownTag {
        question_id: String,
        module_id: ModuleId,
    },

    /// A need score was accumulated for a module that does not exist.
    #[error("need score recorded for unknown module {0}")]
    UnknownModule(ModuleId),

    /// The configured AI entry module is missing from the module list.
    #[error("alwaysStartAIAt references unknown module {0}")]
    MissingEntryModule(ModuleId),

    /// The dataset defines no archetypes, so none can be selected.
    #[error("dataset defines no archetypes")]
    NoArchetypes,

    /// Any other referential integrity violation found during validation.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// `position` is past the last question.
    #[error("no question at position {position} (session has {len} questions)")]
    OutOfRange { position: usize, len: usize },

    /// A control operation was called in the wrong phase.
    #[error("cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// A choice index outside the current question's choices.
    #[error("choice {index} does not exist (question has {len} choices)")]
    InvalidChoice { index: usize, len: usize },
}

impl QuizError {
    /// Returns `true` for errors caused by an inconsistent dataset.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            QuizError::UnknownTag { .. }
                | QuizError::UnknownModule(_)
                | QuizError::MissingEntryModule(_)
                | QuizError::NoArchetypes
                | QuizError::DataIntegrity(_)
        )
    }

    /// Returns `true` for errors caused by driving the session out of order.
    pub fn is_sequencing(&self) -> bool {
        matches!(
            self,
            QuizError::OutOfRange { .. }
                | QuizError::InvalidPhase { .. }
                | QuizError::InvalidChoice { .. }
        )
    }
}

/// A single failed attempt to fetch the raw dataset document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} from {location}")]
    Status { status: u16, location: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Reading a local dataset failed.
    #[error("failed to read {location}: {message}")]
    Io { location: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(QuizError::NoArchetypes.is_data_integrity());
        assert!(QuizError::MissingEntryModule(ModuleId::from(11)).is_data_integrity());
        assert!(!QuizError::NoArchetypes.is_sequencing());
        let seq = QuizError::OutOfRange { position: 3, len: 3 };
        assert!(seq.is_sequencing());
        assert!(!seq.is_data_integrity());
    }

    #[test]
    fn messages() {
        let err = QuizError::UnknownTag {
            question_id: "q7".into(),
            module_id: ModuleId::from(42),
        };
        assert_eq!(
            err.to_string(),
            "question 'q7' is tagged with unknown module 42"
        );
        let err = QuizError::InvalidPhase {
            operation: "submit an answer",
            phase: "showing feedback",
        };
        assert_eq!(err.to_string(), "cannot submit an answer while showing feedback");

        let err = FetchError::Status {
            status: 503,
            location: "http://localhost/data.json".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from http://localhost/data.json");
    }
}
