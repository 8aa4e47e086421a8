use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Answer, Attempt, Question, QuestionKind, Quiz};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    pub refresh_token: String,
}

/// Catalog entry: a public quiz joined with its creator's username.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSummaryDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A question as shown to a quiz taker. Grading happens server-side, so the
/// correct answer never leaves the service.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub id: String,
    pub question_text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub points: i32,
    pub order_index: i32,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id,
            question_text: question.question_text,
            kind: question.kind,
            points: question.points,
            order_index: question.order_index,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizDetailResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuestionDto>,
}

impl QuizDetailResponse {
    pub fn from_parts(quiz: Quiz, questions: Vec<Question>) -> Self {
        QuizDetailResponse {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            questions: questions.into_iter().map(QuestionDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizCreatedResponse {
    pub id: String,
    pub title: String,
    pub question_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SubmitAttemptResponse {
    pub attempt_id: String,
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
}

impl From<&Attempt> for SubmitAttemptResponse {
    fn from(attempt: &Attempt) -> Self {
        SubmitAttemptResponse {
            attempt_id: attempt.id.clone(),
            score: attempt.score,
            max_score: attempt.max_score,
            percentage: attempt.percentage,
        }
    }
}

/// One row of the results review: the answer joined with its question.
/// The stored correct answer is revealed only for incorrect answers.
#[derive(Debug, Serialize)]
pub struct AnswerReviewDto {
    pub question_text: String,
    pub question_type: String,
    pub points: i32,
    pub user_answer: String,
    pub is_correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

impl AnswerReviewDto {
    pub fn from_parts(answer: &Answer, question: &Question) -> Self {
        AnswerReviewDto {
            question_text: question.question_text.clone(),
            question_type: question.kind.type_name().to_string(),
            points: question.points,
            user_answer: answer.user_answer.clone(),
            is_correct: answer.is_correct,
            correct_answer: if answer.is_correct {
                None
            } else {
                Some(question.correct_answer.clone())
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub attempt_id: String,
    pub quiz_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_description: Option<String>,
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
    pub grade: String,
    pub answers: Vec<AnswerReviewDto>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RecentAttemptDto {
    pub attempt_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_quizzes: i64,
    pub total_attempts: i64,
    pub average_percentage: f64,
    pub recent_attempts: Vec<RecentAttemptDto>,
}
