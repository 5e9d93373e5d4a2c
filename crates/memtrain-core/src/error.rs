//! Engine error types.
//!
//! Every failure the engine can report to a front end is one of these
//! variants. None of them are recoverable inside the engine; invalid answer
//! input is handled separately by [`crate::grader::is_valid_input`].

use thiserror::Error;

/// Errors raised while loading a table or running a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemtrainError {
    /// A settings directive token or a command-line override was rejected.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The table is missing its header row or a mandatory column.
    #[error("table format error: {0}")]
    TableFormat(String),

    /// A tag or entity id that does not exist was queried.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Fewer than three distinct wrong answers exist for a multiple-choice question.
    #[error("not enough distinct responses to build multiple-choice options for '{0}'")]
    InsufficientData(String),

    /// Filtering left no cue/response pairs to ask.
    #[error("there are no responses available that match the criteria")]
    NoQuestionsAvailable,
}

impl MemtrainError {
    /// Stable label used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            MemtrainError::Configuration(_) => "configuration",
            MemtrainError::TableFormat(_) => "table-format",
            MemtrainError::Lookup(_) => "lookup",
            MemtrainError::InsufficientData(_) => "insufficient-data",
            MemtrainError::NoQuestionsAvailable => "no-questions-available",
        }
    }

    pub(crate) fn invalid_setting(token: &str) -> Self {
        MemtrainError::Configuration(format!("'{token}': invalid setting"))
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, MemtrainError>;
