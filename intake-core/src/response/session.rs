//! Response lifecycle state machine
//!
//! A [`ResponseSession`] owns one respondent's draft and the last committed
//! snapshot for an assessment instance, and moves between Edit and Review
//! through explicit, synchronous transitions. Persistence is best-effort: a
//! failed read counts as "never saved" and a failed write never blocks a
//! transition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::schema::{Assessment, Question};
use crate::store::ResponseStore;
use crate::submit::SubmissionRecord;

use super::answer::{AnswerSet, AnswerValue};
use super::validation::validate;
use super::visibility::{is_visible, visible_answers};

/// Mode of a response session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The draft is being mutated; saving is gated on validation
    Edit,
    /// The last saved snapshot is on display
    Review,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Review => "review",
        }
    }
}

/// A single respondent's run of one assessment.
///
/// There is exactly one active session per (assessment, instance); the last
/// writer to save wins silently.
pub struct ResponseSession {
    assessment: Assessment,
    draft: AnswerSet,
    snapshot: AnswerSet,
    errors: BTreeMap<String, String>,
    mode: Mode,
}

impl ResponseSession {
    /// Open a session, loading any previously saved snapshot.
    ///
    /// Starts in Review when a non-empty snapshot exists, otherwise in Edit.
    /// A failed or corrupt read counts as "never saved".
    pub fn start(assessment: Assessment, store: &dyn ResponseStore) -> Self {
        let snapshot = match store.get_responses(&assessment.id) {
            Ok(saved) => saved,
            Err(err) => {
                warn!(
                    assessment_id = %assessment.id,
                    error = %err,
                    "failed to load saved responses, starting empty"
                );
                AnswerSet::new()
            }
        };
        let mode = if snapshot.is_empty() {
            Mode::Edit
        } else {
            Mode::Review
        };
        debug!(assessment_id = %assessment.id, mode = mode.as_str(), "response session started");
        Self {
            assessment,
            draft: snapshot.clone(),
            snapshot,
            errors: BTreeMap::new(),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    /// The in-progress draft
    pub fn answers(&self) -> &AnswerSet {
        &self.draft
    }

    /// The last committed snapshot
    pub fn snapshot(&self) -> &AnswerSet {
        &self.snapshot
    }

    /// The error map published by the last `check` or failed `save`
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Questions currently shown for the in-progress draft
    pub fn visible_questions(&self) -> Vec<&Question> {
        self.assessment
            .questions()
            .filter(|q| is_visible(q, &self.draft))
            .collect()
    }

    /// Record an answer in the draft (Edit mode only)
    pub fn set_answer(&mut self, question_id: &str, value: AnswerValue) -> Result<(), SessionError> {
        self.require_mode(Mode::Edit)?;
        self.draft.insert(question_id.to_string(), value);
        Ok(())
    }

    /// Drop an answer from the draft (Edit mode only)
    pub fn clear_answer(&mut self, question_id: &str) -> Result<(), SessionError> {
        self.require_mode(Mode::Edit)?;
        self.draft.remove(question_id);
        Ok(())
    }

    /// Recompute the live error map without changing mode
    pub fn check(&mut self) -> &BTreeMap<String, String> {
        self.errors = validate(&self.assessment, &self.draft);
        &self.errors
    }

    /// Edit → Review: validate the draft, commit the visible answers as the
    /// new snapshot, persist best-effort.
    ///
    /// On validation failure the session stays in Edit with the error map
    /// published and the draft intact. Hidden questions keep their stale
    /// draft values in memory, but those values are excluded from the
    /// committed snapshot.
    pub fn save(&mut self, store: &dyn ResponseStore) -> Result<(), SessionError> {
        self.require_mode(Mode::Edit)?;
        self.errors = validate(&self.assessment, &self.draft);
        if !self.errors.is_empty() {
            return Err(SessionError::ValidationFailed(self.errors.len()));
        }

        let committed = visible_answers(&self.assessment, &self.draft);
        if let Err(err) = store.put_responses(&self.assessment.id, &committed) {
            warn!(
                assessment_id = %self.assessment.id,
                error = %err,
                "failed to persist responses"
            );
        }
        self.snapshot = committed;
        self.mode = Mode::Review;
        debug!(assessment_id = %self.assessment.id, "responses saved");
        Ok(())
    }

    /// Review → Edit: reload the draft from the last committed snapshot and
    /// clear the error map
    pub fn start_edit(&mut self) -> Result<(), SessionError> {
        self.require_mode(Mode::Review)?;
        self.draft = self.snapshot.clone();
        self.errors.clear();
        self.mode = Mode::Edit;
        Ok(())
    }

    /// Edit → Review: discard the draft and restore the snapshot. No
    /// persistence write occurs.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.require_mode(Mode::Edit)?;
        self.draft = self.snapshot.clone();
        self.errors.clear();
        self.mode = Mode::Review;
        Ok(())
    }

    /// Deterministic, uniquely-identified record of the committed snapshot,
    /// ready to hand to an upstream submission endpoint
    pub fn submission(&self) -> SubmissionRecord {
        SubmissionRecord::from_answers(&self.snapshot)
    }

    fn require_mode(&self, expected: Mode) -> Result<(), SessionError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                expected: expected.as_str().to_string(),
                actual: self.mode.as_str().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AssessmentStatus, QuestionKind, Section, VisibleIf};
    use crate::store::MemoryStore;

    fn assessment(questions: Vec<Question>) -> Assessment {
        Assessment {
            id: "a1".into(),
            title: "T".into(),
            job: String::new(),
            status: AssessmentStatus::Active,
            sections: vec![Section {
                id: "s1".into(),
                title: "S".into(),
                questions,
            }],
        }
    }

    fn short(id: &str, required: bool) -> Question {
        Question {
            id: id.to_string(),
            label: id.to_string(),
            required,
            kind: QuestionKind::short(),
            visible_if: None,
        }
    }

    #[test]
    fn starts_in_edit_without_a_snapshot() {
        let store = MemoryStore::new();
        let session = ResponseSession::start(assessment(vec![short("q1", false)]), &store);
        assert_eq!(session.mode(), Mode::Edit);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn starts_in_review_with_a_snapshot() {
        let store = MemoryStore::new();
        let mut saved = AnswerSet::new();
        saved.insert("q1".into(), AnswerValue::text("hi"));
        store.put_responses("a1", &saved).unwrap();

        let session = ResponseSession::start(assessment(vec![short("q1", false)]), &store);
        assert_eq!(session.mode(), Mode::Review);
        assert_eq!(session.snapshot(), &saved);
        assert_eq!(session.answers(), &saved);
    }

    #[test]
    fn read_failure_counts_as_never_saved() {
        let store = MemoryStore::new();
        store.fail_reads();
        let session = ResponseSession::start(assessment(vec![short("q1", false)]), &store);
        assert_eq!(session.mode(), Mode::Edit);
    }

    #[test]
    fn set_answer_is_rejected_in_review() {
        let store = MemoryStore::new();
        let mut saved = AnswerSet::new();
        saved.insert("q1".into(), AnswerValue::text("hi"));
        store.put_responses("a1", &saved).unwrap();

        let mut session = ResponseSession::start(assessment(vec![short("q1", false)]), &store);
        let err = session.set_answer("q1", AnswerValue::text("new")).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidState {
                expected: "edit".into(),
                actual: "review".into(),
            }
        );
    }

    #[test]
    fn failed_save_stays_in_edit_and_keeps_the_draft() {
        let store = MemoryStore::new();
        let mut session = ResponseSession::start(assessment(vec![short("q1", true)]), &store);

        let err = session.save(&store).unwrap_err();
        assert_eq!(err, SessionError::ValidationFailed(1));
        assert_eq!(session.mode(), Mode::Edit);
        assert_eq!(
            session.errors().get("q1").map(String::as_str),
            Some("This field is required.")
        );
        // Nothing was persisted.
        assert!(store.get_responses("a1").unwrap().is_empty());
    }

    #[test]
    fn successful_save_commits_and_enters_review() {
        let store = MemoryStore::new();
        let mut session = ResponseSession::start(assessment(vec![short("q1", true)]), &store);
        session.set_answer("q1", AnswerValue::text("done")).unwrap();
        session.save(&store).unwrap();

        assert_eq!(session.mode(), Mode::Review);
        assert!(session.errors().is_empty());
        assert_eq!(
            store.get_responses("a1").unwrap().get("q1"),
            Some(&AnswerValue::text("done"))
        );
    }

    #[test]
    fn save_excludes_hidden_answers_from_the_snapshot() {
        let gated = Question {
            id: "q2".into(),
            label: "q2".into(),
            required: false,
            kind: QuestionKind::short(),
            visible_if: Some(VisibleIf {
                question_id: "q1".into(),
                equals: "Yes".into(),
            }),
        };
        let a = assessment(vec![short("q1", false), gated]);

        let store = MemoryStore::new();
        let mut session = ResponseSession::start(a, &store);
        session.set_answer("q1", AnswerValue::text("Yes")).unwrap();
        session.set_answer("q2", AnswerValue::text("stale")).unwrap();
        // Flipping q1 hides q2; its draft value is retained in memory only.
        session.set_answer("q1", AnswerValue::text("No")).unwrap();
        session.save(&store).unwrap();

        assert!(session.snapshot().get("q2").is_none());
        assert!(store.get_responses("a1").unwrap().get("q2").is_none());
        // The draft itself is not cleared automatically.
        assert_eq!(session.answers().get("q2"), Some(&AnswerValue::text("stale")));
    }

    #[test]
    fn write_failure_does_not_block_the_transition() {
        let store = MemoryStore::new();
        store.fail_writes();
        let mut session = ResponseSession::start(assessment(vec![short("q1", false)]), &store);
        session.set_answer("q1", AnswerValue::text("x")).unwrap();
        session.save(&store).unwrap();
        assert_eq!(session.mode(), Mode::Review);
    }

    #[test]
    fn cancel_restores_the_snapshot_exactly() {
        let store = MemoryStore::new();
        let mut session = ResponseSession::start(assessment(vec![short("q1", false)]), &store);
        session.set_answer("q1", AnswerValue::text("v1")).unwrap();
        session.save(&store).unwrap();

        session.start_edit().unwrap();
        session.set_answer("q1", AnswerValue::text("v2")).unwrap();
        session.cancel().unwrap();

        assert_eq!(session.mode(), Mode::Review);
        assert_eq!(session.answers().get("q1"), Some(&AnswerValue::text("v1")));
        assert!(session.errors().is_empty());
    }

    #[test]
    fn check_publishes_live_errors_without_transitioning() {
        let store = MemoryStore::new();
        let mut session = ResponseSession::start(assessment(vec![short("q1", true)]), &store);
        assert_eq!(session.check().len(), 1);
        assert_eq!(session.mode(), Mode::Edit);

        session.set_answer("q1", AnswerValue::text("ok")).unwrap();
        assert!(session.check().is_empty());
    }

    #[test]
    fn visible_questions_follow_the_draft() {
        let gated = Question {
            id: "q2".into(),
            label: "q2".into(),
            required: false,
            kind: QuestionKind::short(),
            visible_if: Some(VisibleIf {
                question_id: "q1".into(),
                equals: "Yes".into(),
            }),
        };
        let store = MemoryStore::new();
        let mut session = ResponseSession::start(assessment(vec![short("q1", false), gated]), &store);
        assert_eq!(session.visible_questions().len(), 1);

        session.set_answer("q1", AnswerValue::text("Yes")).unwrap();
        assert_eq!(session.visible_questions().len(), 2);
    }

    #[test]
    fn submission_wraps_the_committed_snapshot() {
        let store = MemoryStore::new();
        let mut session = ResponseSession::start(assessment(vec![short("q1", false)]), &store);
        session.set_answer("q1", AnswerValue::text("hi")).unwrap();
        session.save(&store).unwrap();

        let record = session.submission();
        assert_eq!(record.payload["q1"], "hi");
        assert!(!record.id.is_empty());
    }
}
