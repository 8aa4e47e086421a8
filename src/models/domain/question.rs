use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single gradable prompt within a quiz. `kind` is flattened so the
/// persisted document carries a `question_type` discriminant, with the
/// option list present only on multiple-choice questions.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub correct_answer: String,
    pub points: i32,
    pub order_index: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "question_type", rename_all = "snake_case")]
pub enum QuestionKind {
    Mcq { options: Vec<String> },
    TrueFalse,
    ShortAnswer,
}

impl QuestionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::Mcq { .. } => "mcq",
            QuestionKind::TrueFalse => "true_false",
            QuestionKind::ShortAnswer => "short_answer",
        }
    }
}

impl Question {
    pub fn new(
        quiz_id: &str,
        question_text: &str,
        kind: QuestionKind,
        correct_answer: &str,
        points: i32,
        order_index: i32,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            question_text: question_text.to_string(),
            kind,
            correct_answer: correct_answer.to_string(),
            points,
            order_index,
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_tag_round_trips() {
        let question = Question::new(
            "quiz-1",
            "Is the borrow checker part of rustc?",
            QuestionKind::TrueFalse,
            "true",
            1,
            0,
        );

        let json = serde_json::to_string(&question).expect("question should serialize");
        assert!(json.contains("\"question_type\":\"true_false\""));
        assert!(!json.contains("options"));

        let parsed: Question = serde_json::from_str(&json).expect("question should deserialize");
        assert_eq!(parsed.kind, QuestionKind::TrueFalse);
    }

    #[test]
    fn mcq_carries_its_options() {
        let question = Question::new(
            "quiz-1",
            "Which keyword declares an immutable binding?",
            QuestionKind::Mcq {
                options: vec!["let".to_string(), "mut".to_string(), "static".to_string()],
            },
            "let",
            2,
            1,
        );

        let json = serde_json::to_string(&question).expect("question should serialize");
        assert!(json.contains("\"question_type\":\"mcq\""));
        assert!(json.contains("\"options\""));

        let parsed: Question = serde_json::from_str(&json).expect("question should deserialize");
        match parsed.kind {
            QuestionKind::Mcq { ref options } => assert_eq!(options.len(), 3),
            _ => panic!("expected mcq variant"),
        }
    }

    #[test]
    fn unknown_question_type_is_rejected() {
        let json = r#"{
            "id": "q-1",
            "quiz_id": "quiz-1",
            "question_text": "prompt",
            "question_type": "essay",
            "correct_answer": "x",
            "points": 1,
            "order_index": 0
        }"#;

        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn type_names_match_wire_tags() {
        assert_eq!(
            QuestionKind::Mcq { options: vec![] }.type_name(),
            "mcq"
        );
        assert_eq!(QuestionKind::TrueFalse.type_name(), "true_false");
        assert_eq!(QuestionKind::ShortAnswer.type_name(), "short_answer");
    }
}
