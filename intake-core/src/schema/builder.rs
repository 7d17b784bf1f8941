//! Builder mutation API over an isolated schema draft

use tracing::warn;
use uuid::Uuid;

use super::assessment::{Assessment, AssessmentStatus, Section};
use super::question::{Question, QuestionKind, QuestionPatch};
use crate::error::SchemaError;
use crate::store::SchemaStore;

/// An owned, isolated draft of an assessment being authored.
///
/// Edits never touch the persisted collection; [`save`](Self::save) validates
/// and upserts the draft as one unit, cancel is simply dropping the value.
/// Editing an existing assessment starts from a deep copy, never an aliased
/// view.
#[derive(Debug, Clone)]
pub struct SchemaDraft {
    assessment: Assessment,
}

fn fresh_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

impl SchemaDraft {
    /// Start a draft for a brand-new assessment
    pub fn new() -> Self {
        Self {
            assessment: Assessment {
                id: fresh_id("a"),
                title: String::new(),
                job: String::new(),
                status: AssessmentStatus::Active,
                sections: Vec::new(),
            },
        }
    }

    /// Start a draft from an existing assessment
    pub fn edit(assessment: &Assessment) -> Self {
        Self {
            assessment: assessment.clone(),
        }
    }

    /// The draft's current value
    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.assessment.title = title.into();
    }

    pub fn set_job(&mut self, job: impl Into<String>) {
        self.assessment.job = job.into();
    }

    pub fn set_status(&mut self, status: AssessmentStatus) {
        self.assessment.status = status;
    }

    /// Append a new section with a fresh id, default title, and no questions.
    /// Returns the new section's id.
    pub fn add_section(&mut self) -> String {
        let id = fresh_id("s");
        self.assessment.sections.push(Section {
            id: id.clone(),
            title: "New Section".to_string(),
            questions: Vec::new(),
        });
        id
    }

    /// Retitle a section; no-op if the id is unknown
    pub fn update_section(&mut self, section_id: &str, title: impl Into<String>) {
        if let Some(section) = self.section_mut(section_id) {
            section.title = title.into();
        }
    }

    /// Remove a section and, with it, all of its questions
    pub fn remove_section(&mut self, section_id: &str) {
        self.assessment.sections.retain(|s| s.id != section_id);
    }

    /// Append a question with a fresh id and `required = false`.
    ///
    /// The kind carries its authoring defaults (see [`QuestionKind::single`]
    /// and friends). Returns the new question's id, or `None` if the section
    /// is unknown.
    pub fn add_question(&mut self, section_id: &str, kind: QuestionKind) -> Option<String> {
        let section = self.section_mut(section_id)?;
        let id = fresh_id("q");
        section.questions.push(Question {
            id: id.clone(),
            label: "Untitled Question".to_string(),
            required: false,
            kind,
            visible_if: None,
        });
        Some(id)
    }

    /// Merge patch fields into a question; no-op if either id is unknown
    pub fn update_question(&mut self, section_id: &str, question_id: &str, patch: QuestionPatch) {
        if let Some(section) = self.section_mut(section_id) {
            if let Some(question) = section.questions.iter_mut().find(|q| q.id == question_id) {
                question.apply(patch);
            }
        }
    }

    /// Remove one question from its section
    pub fn remove_question(&mut self, section_id: &str, question_id: &str) {
        if let Some(section) = self.section_mut(section_id) {
            section.questions.retain(|q| q.id != question_id);
        }
    }

    /// Validate the draft and upsert it into the persisted collection.
    ///
    /// Fails on a blank title or a visibility rule pointing at a question id
    /// that exists nowhere in the assessment. A self-reference is allowed:
    /// visibility evaluation is single-level and cannot loop.
    ///
    /// Persistence is best-effort: a failed read is treated as an empty
    /// collection and a failed write is logged, with the committed value
    /// still returned.
    pub fn save(self, store: &dyn SchemaStore) -> Result<Assessment, SchemaError> {
        if self.assessment.title.trim().is_empty() {
            return Err(SchemaError::TitleRequired);
        }
        for question in self.assessment.questions() {
            if let Some(rule) = &question.visible_if {
                if !rule.question_id.is_empty()
                    && !self.assessment.contains_question(&rule.question_id)
                {
                    return Err(SchemaError::UnknownDependency {
                        question_id: question.id.clone(),
                        depends_on: rule.question_id.clone(),
                    });
                }
            }
        }

        let mut items = match store.get_schemas() {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "failed to read schema collection, starting empty");
                Vec::new()
            }
        };
        match items.iter_mut().find(|a| a.id == self.assessment.id) {
            Some(existing) => *existing = self.assessment.clone(),
            None => items.push(self.assessment.clone()),
        }
        if let Err(err) = store.put_schemas(&items) {
            warn!(error = %err, "failed to persist schema collection");
        }
        Ok(self.assessment)
    }

    fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.assessment.sections.iter_mut().find(|s| s.id == section_id)
    }
}

impl Default for SchemaDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a comma-delimited options string: entries trimmed, empties dropped,
/// duplicates kept.
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
