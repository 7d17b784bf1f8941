//! Assessment schema model and the builder mutation API

mod assessment;
mod builder;
mod question;

pub use assessment::{Assessment, AssessmentStatus, Section, find_assessments};
pub use builder::{SchemaDraft, parse_options};
pub use question::{Question, QuestionKind, QuestionPatch, VisibleIf};
