//! Answer values and the draft answer set

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stored metadata for a file answer. File bytes are never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
}

/// A single question's answer.
///
/// Untagged so the serialized form mirrors the natural JSON shape of each
/// kind: array of strings, `{name, size}`, number, string, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Multi-choice selection
    Selection(Vec<String>),
    /// File metadata
    File(FileMeta),
    /// Numeric answer entered programmatically
    Number(f64),
    /// Text answer (single choice, short/long text, or raw number input)
    Text(String),
    /// Explicitly cleared (e.g. a removed file)
    Null,
}

/// Draft or snapshot answers keyed by question id; an absent key means
/// unanswered
pub type AnswerSet = BTreeMap<String, AnswerValue>;

impl AnswerValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn selection<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Selection(items.into_iter().map(Into::into).collect())
    }

    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self::File(FileMeta {
            name: name.into(),
            size,
        })
    }

    /// "Empty" for required-field purposes: cleared, blank text, or an empty
    /// selection
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Selection(items) => items.is_empty(),
            Self::Number(_) | Self::File(_) => false,
        }
    }

    /// Exact-match test used by visibility rules.
    ///
    /// A selection matches when it contains the literal, a text answer when
    /// it equals the literal. Every other shape never matches: the comparison
    /// is type-sensitive.
    pub fn matches(&self, equals: &str) -> bool {
        match self {
            Self::Selection(items) => items.iter().any(|v| v == equals),
            Self::Text(s) => s == equals,
            Self::Number(_) | Self::File(_) | Self::Null => false,
        }
    }

    /// Character count of a text answer; other shapes have none
    pub fn text_len(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.chars().count()),
            _ => None,
        }
    }
}
