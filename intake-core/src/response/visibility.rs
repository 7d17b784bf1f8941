//! Visibility evaluation for conditional questions
//!
//! Evaluation is single-level and non-recursive: a rule reads the raw draft
//! answer of its dependency, never the dependency's own visibility, so an
//! authored dependency cycle cannot loop. It always runs against the current
//! in-progress draft, not the last snapshot.

use crate::schema::{Assessment, Question};

use super::answer::AnswerSet;

/// Whether a question is currently shown given the in-progress draft.
///
/// A question with no rule (or a rule with an empty dependency id) is always
/// visible. An unanswered dependency hides the question.
pub fn is_visible(question: &Question, answers: &AnswerSet) -> bool {
    let Some(rule) = &question.visible_if else {
        return true;
    };
    if rule.question_id.is_empty() {
        return true;
    }
    match answers.get(&rule.question_id) {
        Some(value) => value.matches(&rule.equals),
        None => false,
    }
}

/// The draft filtered down to currently-visible questions.
///
/// This is what a successful save commits: hidden questions keep whatever
/// stale value they hold in the draft, but that value is not part of the
/// snapshot. Values for ids the schema does not know are dropped too.
pub fn visible_answers(assessment: &Assessment, answers: &AnswerSet) -> AnswerSet {
    assessment
        .questions()
        .filter(|q| is_visible(q, answers))
        .filter_map(|q| answers.get(&q.id).map(|v| (q.id.clone(), v.clone())))
        .collect()
}
