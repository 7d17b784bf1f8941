//! Response engine: answers, visibility, validation, and lifecycle

mod answer;
mod session;
mod validation;
mod visibility;

pub use answer::{AnswerSet, AnswerValue, FileMeta};
pub use session::{Mode, ResponseSession};
pub use validation::validate;
pub use visibility::{is_visible, visible_answers};
