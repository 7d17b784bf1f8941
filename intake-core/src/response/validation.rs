//! Per-question validation over the currently-visible set

use std::collections::BTreeMap;

use crate::schema::{Assessment, QuestionKind};

use super::answer::{AnswerSet, AnswerValue};
use super::visibility::is_visible;

/// Validate the draft against the schema.
///
/// Pure function: no side effects, the caller decides when to run it (on
/// every keystroke for live errors, and always before a save transition).
/// Only currently-visible questions are checked, so a hidden required
/// question is never blocking. Per question the first failing rule wins:
/// `required` short-circuits the kind-specific checks.
pub fn validate(assessment: &Assessment, answers: &AnswerSet) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    for question in assessment.questions() {
        if !is_visible(question, answers) {
            continue;
        }
        let value = answers.get(&question.id);

        if question.required && value.is_none_or(AnswerValue::is_empty) {
            errors.insert(question.id.clone(), "This field is required.".to_string());
            continue;
        }

        match &question.kind {
            QuestionKind::Short { max_length } | QuestionKind::Long { max_length } => {
                if let (Some(max), Some(value)) = (max_length, value) {
                    if value.text_len().unwrap_or(0) > *max {
                        errors.insert(
                            question.id.clone(),
                            format!("Max length is {max} characters."),
                        );
                    }
                }
            }
            QuestionKind::Number { min, max } => match value.and_then(numeric_reading) {
                Some(Ok(n)) => {
                    // min first, then max: a value out of range on both
                    // sides reports the max message.
                    if let Some(min) = min {
                        if n < *min {
                            errors.insert(question.id.clone(), format!("Min is {min}."));
                        }
                    }
                    if let Some(max) = max {
                        if n > *max {
                            errors.insert(question.id.clone(), format!("Max is {max}."));
                        }
                    }
                }
                Some(Err(())) => {
                    errors.insert(question.id.clone(), "Must be a number.".to_string());
                }
                None => {}
            },
            QuestionKind::Single { .. } | QuestionKind::Multi { .. } | QuestionKind::File => {}
        }
    }

    errors
}

/// Numeric reading of a raw answer: `None` when there is nothing to check
/// (unanswered, cleared, or blank text), `Err(())` when the value has no
/// numeric interpretation.
fn numeric_reading(value: &AnswerValue) -> Option<Result<f64, ()>> {
    match value {
        AnswerValue::Number(n) => Some(Ok(*n)),
        AnswerValue::Text(s) if s.trim().is_empty() => None,
        AnswerValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if !n.is_nan() => Some(Ok(n)),
            _ => Some(Err(())),
        },
        AnswerValue::Null => None,
        AnswerValue::Selection(_) | AnswerValue::File(_) => Some(Err(())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AssessmentStatus, Question, Section, VisibleIf};

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

    fn q(id: &str, required: bool, kind: QuestionKind) -> Question {
        Question {
            id: id.to_string(),
            label: id.to_string(),
            required,
            kind,
            visible_if: None,
        }
    }

    #[test]
    fn required_check_short_circuits_length_check() {
        let a = assessment(vec![q(
            "q1",
            true,
            QuestionKind::Short { max_length: Some(5) },
        )]);
        let errors = validate(&a, &AnswerSet::new());
        assert_eq!(errors.get("q1").map(String::as_str), Some("This field is required."));
    }

    #[test]
    fn length_check_uses_the_cap() {
        let a = assessment(vec![q(
            "q1",
            false,
            QuestionKind::Long { max_length: Some(3) },
        )]);
        let mut answers = AnswerSet::new();
        answers.insert("q1".into(), AnswerValue::text("abcd"));
        let errors = validate(&a, &answers);
        assert_eq!(errors.get("q1").map(String::as_str), Some("Max length is 3 characters."));

        answers.insert("q1".into(), AnswerValue::text("abc"));
        assert!(validate(&a, &answers).is_empty());
    }

    #[test]
    fn number_out_of_range_on_both_sides_reports_max() {
        let a = assessment(vec![q(
            "qn",
            false,
            QuestionKind::Number {
                min: Some(1.0),
                max: Some(10.0),
            },
        )]);
        let mut answers = AnswerSet::new();
        answers.insert("qn".into(), AnswerValue::text("15"));
        let errors = validate(&a, &answers);
        assert_eq!(errors.get("qn").map(String::as_str), Some("Max is 10."));

        answers.insert("qn".into(), AnswerValue::text("0"));
        let errors = validate(&a, &answers);
        assert_eq!(errors.get("qn").map(String::as_str), Some("Min is 1."));
    }

    #[test]
    fn unparseable_number_reports_only_must_be_a_number() {
        let a = assessment(vec![q(
            "qn",
            false,
            QuestionKind::Number {
                min: Some(1.0),
                max: Some(10.0),
            },
        )]);
        for raw in ["abc", "NaN", "1.2.3"] {
            let mut answers = AnswerSet::new();
            answers.insert("qn".into(), AnswerValue::text(raw));
            let errors = validate(&a, &answers);
            assert_eq!(errors.get("qn").map(String::as_str), Some("Must be a number."), "{raw}");
        }
    }

    #[test]
    fn blank_optional_number_passes() {
        let a = assessment(vec![q(
            "qn",
            false,
            QuestionKind::Number {
                min: Some(1.0),
                max: None,
            },
        )]);
        let mut answers = AnswerSet::new();
        answers.insert("qn".into(), AnswerValue::text(""));
        assert!(validate(&a, &answers).is_empty());
    }

    #[test]
    fn numeric_answer_value_is_range_checked() {
        let a = assessment(vec![q(
            "qn",
            false,
            QuestionKind::Number {
                min: None,
                max: Some(10.0),
            },
        )]);
        let mut answers = AnswerSet::new();
        answers.insert("qn".into(), AnswerValue::Number(12.0));
        let errors = validate(&a, &answers);
        assert_eq!(errors.get("qn").map(String::as_str), Some("Max is 10."));
    }

    #[test]
    fn hidden_questions_are_never_reported() {
        let gated = Question {
            id: "q2".into(),
            label: "q2".into(),
            required: true,
            kind: QuestionKind::short(),
            visible_if: Some(VisibleIf {
                question_id: "q1".into(),
                equals: "Yes".into(),
            }),
        };
        let a = assessment(vec![q("q1", false, QuestionKind::single()), gated]);

        let mut answers = AnswerSet::new();
        answers.insert("q1".into(), AnswerValue::text("No"));
        assert!(validate(&a, &answers).is_empty());
    }

    #[test]
    fn empty_multi_selection_fails_required() {
        let a = assessment(vec![q("q1", true, QuestionKind::multi())]);
        let mut answers = AnswerSet::new();
        answers.insert("q1".into(), AnswerValue::Selection(Vec::new()));
        let errors = validate(&a, &answers);
        assert_eq!(errors.get("q1").map(String::as_str), Some("This field is required."));
    }

    #[test]
    fn file_metadata_satisfies_required() {
        let a = assessment(vec![q("q1", true, QuestionKind::file())]);
        let mut answers = AnswerSet::new();
        answers.insert("q1".into(), AnswerValue::file("cv.pdf", 1024));
        assert!(validate(&a, &answers).is_empty());

        answers.insert("q1".into(), AnswerValue::Null);
        assert_eq!(validate(&a, &answers).len(), 1);
    }
}
