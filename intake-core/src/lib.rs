//! intake-core: dynamic assessment schemas and the response engine
//!
//! This crate provides the assessment core for intake:
//!
//! - **Schema model** - [`Assessment`], [`Section`], [`Question`] and the
//!   [`SchemaDraft`] mutation API for authoring
//! - **Visibility evaluator** - [`is_visible`] for single-level conditional
//!   questions, re-run against the in-progress draft on every edit
//! - **Validation engine** - [`validate`], a pure map from (schema, answers)
//!   to per-question errors over the currently-visible set
//! - **Response lifecycle** - [`ResponseSession`], an Edit/Review state
//!   machine with snapshot restore and validation-gated save
//! - **Persistence contracts** - [`SchemaStore`] / [`ResponseStore`] traits
//!   with a [`MemoryStore`] test double; durable adapters live in
//!   `intake-store`
//!
//! # Quick Start
//!
//! ```
//! use intake_core::response::{AnswerValue, ResponseSession};
//! use intake_core::schema::{QuestionKind, SchemaDraft};
//! use intake_core::store::MemoryStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//!
//! // Author a schema.
//! let mut draft = SchemaDraft::new();
//! draft.set_title("FE Onsite");
//! let section = draft.add_section();
//! let question = draft.add_question(&section, QuestionKind::short()).unwrap();
//! let assessment = draft.save(&store)?;
//!
//! // Fill it in.
//! let mut session = ResponseSession::start(assessment, &store);
//! session.set_answer(&question, AnswerValue::text("Hello"))?;
//! session.save(&store)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod response;
pub mod schema;
pub mod store;
pub mod submit;

// Re-export key types for convenience
pub use error::{IntakeError, SchemaError, SessionError, StoreError};
pub use response::{
    AnswerSet, AnswerValue, FileMeta, Mode, ResponseSession, is_visible, validate, visible_answers,
};
pub use schema::{
    Assessment, AssessmentStatus, Question, QuestionKind, QuestionPatch, SchemaDraft, Section,
    VisibleIf, find_assessments, parse_options,
};
pub use store::{MemoryStore, ResponseStore, SchemaStore};
pub use submit::{SubmissionOutcome, SubmissionRecord, SubmissionSink};
