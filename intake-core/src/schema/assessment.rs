//! Assessment and section model

use serde::{Deserialize, Serialize};

use super::question::Question;

/// Publication status of an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Active,
    Archived,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

/// An ordered group of questions with a title.
///
/// Sections are owned exclusively by their assessment; removing one removes
/// all of its questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A named, per-job questionnaire composed of ordered sections.
///
/// Identity is stable once created; section order is render and iteration
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub title: String,
    /// Linked job reference (free-form)
    #[serde(default)]
    pub job: String,
    pub status: AssessmentStatus,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Assessment {
    /// All questions in section order, then question order
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Look up a question anywhere in the assessment
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == question_id)
    }

    /// Whether any section contains the given question id
    pub fn contains_question(&self, question_id: &str) -> bool {
        self.question(question_id).is_some()
    }

    /// Flip between active and archived
    pub fn toggle_archive(&mut self) {
        self.status = match self.status {
            AssessmentStatus::Active => AssessmentStatus::Archived,
            AssessmentStatus::Archived => AssessmentStatus::Active,
        };
    }
}

/// Filter a collection the way the list view does: case-insensitive title
/// substring, plus an optional status filter.
pub fn find_assessments<'a>(
    items: &'a [Assessment],
    title: &str,
    status: Option<AssessmentStatus>,
) -> Vec<&'a Assessment> {
    let needle = title.to_lowercase();
    items
        .iter()
        .filter(|a| needle.is_empty() || a.title.to_lowercase().contains(&needle))
        .filter(|a| status.is_none_or(|s| a.status == s))
        .collect()
}
