//! Error types for intake-core

use thiserror::Error;

/// Top-level error type for intake-core
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors that block saving a schema draft.
///
/// All of these are recoverable by correcting the draft; nothing here is
/// fatal and the draft is never discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("title required")]
    TitleRequired,

    #[error("question {question_id} depends on unknown question {depends_on}")]
    UnknownDependency {
        question_id: String,
        depends_on: String,
    },
}

/// Errors from the response lifecycle state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    #[error("{0} answer(s) failed validation")]
    ValidationFailed(usize),
}

/// Errors from persistence adapters.
///
/// Callers in this crate treat these as best-effort: a failed read degrades
/// to "no data" and a failed write is logged without blocking the in-memory
/// transition.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_title_required_displays_correctly() {
        assert_eq!(SchemaError::TitleRequired.to_string(), "title required");
    }

    #[test]
    fn schema_error_unknown_dependency_names_both_ids() {
        let err = SchemaError::UnknownDependency {
            question_id: "q2".into(),
            depends_on: "q9".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("q2"));
        assert!(msg.contains("q9"));
    }

    #[test]
    fn session_error_invalid_state_displays_correctly() {
        let err = SessionError::InvalidState {
            expected: "edit".into(),
            actual: "review".into(),
        };
        assert!(err.to_string().contains("expected edit"));
        assert!(err.to_string().contains("got review"));
    }

    #[test]
    fn intake_error_converts_from_schema_error() {
        let err: IntakeError = SchemaError::TitleRequired.into();
        assert!(matches!(err, IntakeError::Schema(_)));
    }

    #[test]
    fn intake_error_converts_from_store_error() {
        let err: IntakeError = StoreError::Database("locked".into()).into();
        assert!(err.to_string().contains("locked"));
    }
}
