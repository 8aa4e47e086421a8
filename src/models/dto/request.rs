use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::QuestionKind;

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 50),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must be alphanumeric with underscores"
        )
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Quiz authoring payload. Per-question checks live in the quiz service so
/// rejection messages can name the offending question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuizRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub question_text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub correct_answer: String,
    pub points: i32,
}

/// One submitted answer per question, keyed by question id.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAttemptRequest {
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_register_request() {
        let request = RegisterRequest {
            username: "johndoe".to_string(),
            email: "john@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let request = RegisterRequest {
            username: "johndoe".to_string(),
            email: "invalid-email".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_username_with_spaces_rejected() {
        let request = RegisterRequest {
            username: "john doe".to_string(),
            email: "john@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let request = RegisterRequest {
            username: "johndoe".to_string(),
            email: "john@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn question_input_parses_flattened_type_tag() {
        let json = r#"{
            "question_text": "2 + 2?",
            "question_type": "short_answer",
            "correct_answer": "4",
            "points": 3
        }"#;

        let input: QuestionInput = serde_json::from_str(json).expect("input should parse");
        assert_eq!(input.kind, QuestionKind::ShortAnswer);
        assert_eq!(input.points, 3);
    }

    #[test]
    fn submit_request_parses_answer_map() {
        let json = r#"{ "answers": { "q-1": "true", "q-2": " Paris " } }"#;

        let request: SubmitAttemptRequest =
            serde_json::from_str(json).expect("request should parse");
        assert_eq!(request.answers.len(), 2);
        assert_eq!(request.answers["q-2"], " Paris ");
    }
}
