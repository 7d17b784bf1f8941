//! Submission record handoff
//!
//! The engine's only submission duty is producing a deterministic,
//! uniquely-identified, timestamped record. Transport, retries, and network
//! failure handling belong to the upstream collaborator behind
//! [`SubmissionSink`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreError;
use crate::response::AnswerSet;

/// A committed answer set ready to hand to an upstream endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Freshly generated unique id
    pub id: String,
    /// Creation timestamp
    pub at: DateTime<Utc>,
    /// The committed answers as plain JSON
    pub payload: Value,
}

impl SubmissionRecord {
    /// Build a record from a committed answer set
    pub fn from_answers(answers: &AnswerSet) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            at: Utc::now(),
            payload: serde_json::to_value(answers).unwrap_or_default(),
        }
    }
}

/// Upstream acknowledgement for a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub saved: SubmissionRecord,
}

/// Upstream endpoint accepting submission records
pub trait SubmissionSink: Send + Sync {
    fn submit(
        &self,
        assessment_id: &str,
        record: SubmissionRecord,
    ) -> Result<SubmissionOutcome, StoreError>;
}
