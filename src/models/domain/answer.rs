use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One submitted response to one question within an attempt. `user_answer`
/// keeps the raw submitted text; normalization happens only at grading time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    pub id: String,
    pub attempt_id: String,
    pub question_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(attempt_id: &str, question_id: &str, user_answer: &str, is_correct: bool) -> Self {
        Answer {
            id: Uuid::new_v4().to_string(),
            attempt_id: attempt_id.to_string(),
            question_id: question_id.to_string(),
            user_answer: user_answer.to_string(),
            is_correct,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_keeps_raw_submitted_text() {
        let answer = Answer::new("attempt-1", "q-1", "  Paris ", true);

        assert_eq!(answer.user_answer, "  Paris ");
        assert!(answer.is_correct);
    }
}
