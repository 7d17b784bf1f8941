//! Question types, constraints, and visibility rules

use serde::{Deserialize, Serialize};

/// Conditional visibility rule: show a question only while another
/// question's current answer equals a literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleIf {
    /// Id of the question this one depends on. May live in any section of
    /// the same assessment.
    pub question_id: String,
    /// Literal the dependency's answer must equal (or contain, for a
    /// multi-choice dependency).
    pub equals: String,
}

/// The six question kinds and their type-specific constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    /// One choice from a fixed option list
    Single { options: Vec<String> },
    /// Any number of choices from a fixed option list
    Multi { options: Vec<String> },
    /// Single-line text
    Short {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Multi-line text
    Long {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Numeric input with optional bounds
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// File upload; only name and size are ever stored
    File,
}

impl QuestionKind {
    /// Single choice with the authoring placeholder options
    pub fn single() -> Self {
        Self::Single {
            options: placeholder_options(),
        }
    }

    /// Multi choice with the authoring placeholder options
    pub fn multi() -> Self {
        Self::Multi {
            options: placeholder_options(),
        }
    }

    /// Short text with no length cap
    pub fn short() -> Self {
        Self::Short { max_length: None }
    }

    /// Long text with no length cap
    pub fn long() -> Self {
        Self::Long { max_length: None }
    }

    /// Number with unset bounds
    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
        }
    }

    /// File metadata question
    pub fn file() -> Self {
        Self::File
    }

    /// The kind's wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single { .. } => "single",
            Self::Multi { .. } => "multi",
            Self::Short { .. } => "short",
            Self::Long { .. } => "long",
            Self::Number { .. } => "number",
            Self::File => "file",
        }
    }
}

fn placeholder_options() -> Vec<String> {
    vec!["Option 1".to_string(), "Option 2".to_string()]
}

/// A single prompt with validation constraints and an optional visibility rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<VisibleIf>,
}

/// Merge-patch applied by [`SchemaDraft::update_question`].
///
/// `None` leaves a field untouched. Kind-specific fields are ignored when the
/// target question has a different kind. The nested options on `max_length`,
/// `min`, `max`, and `visible_if` distinguish "set" from "clear".
///
/// [`SchemaDraft::update_question`]: super::SchemaDraft::update_question
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub max_length: Option<Option<usize>>,
    pub min: Option<Option<f64>>,
    pub max: Option<Option<f64>>,
    pub visible_if: Option<Option<VisibleIf>>,
}

impl Question {
    /// Merge patch fields into this question
    pub(crate) fn apply(&mut self, patch: QuestionPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        match &mut self.kind {
            QuestionKind::Single { options } | QuestionKind::Multi { options } => {
                if let Some(new) = patch.options {
                    *options = new;
                }
            }
            QuestionKind::Short { max_length } | QuestionKind::Long { max_length } => {
                if let Some(new) = patch.max_length {
                    *max_length = new;
                }
            }
            QuestionKind::Number { min, max } => {
                if let Some(new) = patch.min {
                    *min = new;
                }
                if let Some(new) = patch.max {
                    *max = new;
                }
            }
            QuestionKind::File => {}
        }
        if let Some(rule) = patch.visible_if {
            self.visible_if = rule;
        }
    }
}
