use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Attempt {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
    pub completed_at: DateTime<Utc>,
}

impl Attempt {
    pub fn new(quiz_id: &str, user_id: &str, score: i32, max_score: i32, percentage: f64) -> Self {
        Attempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            user_id: user_id.to_string(),
            score,
            max_score,
            percentage,
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_round_trip_preserves_grading_fields() {
        let attempt = Attempt::new("quiz-1", "user-1", 4, 5, 80.0);

        let json = serde_json::to_string(&attempt).expect("attempt should serialize");
        let parsed: Attempt = serde_json::from_str(&json).expect("attempt should deserialize");

        assert_eq!(parsed.score, 4);
        assert_eq!(parsed.max_score, 5);
        assert_eq!(parsed.percentage, 80.0);
        assert_eq!(parsed.quiz_id, "quiz-1");
    }
}
