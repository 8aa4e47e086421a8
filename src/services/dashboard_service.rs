use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::dto::response::{DashboardResponse, RecentAttemptDto},
    repositories::{AttemptRepository, QuizRepository},
};

const RECENT_ATTEMPTS_LIMIT: i64 = 5;

pub struct DashboardService {
    quizzes: Arc<dyn QuizRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl DashboardService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { quizzes, attempts }
    }

    /// Stats for the signed-in user: corpus-wide quiz count, the user's
    /// attempt count, their most recent attempts joined with quiz titles,
    /// and the average percentage over those recent attempts.
    pub async fn overview(&self, user_id: &str) -> AppResult<DashboardResponse> {
        let (total_quizzes, total_attempts, recent) = futures::try_join!(
            self.quizzes.count(),
            self.attempts.count_by_user(user_id),
            self.attempts.find_recent_by_user(user_id, RECENT_ATTEMPTS_LIMIT)
        )?;

        let mut quiz_ids: Vec<String> = recent.iter().map(|a| a.quiz_id.clone()).collect();
        quiz_ids.sort();
        quiz_ids.dedup();

        let titles: HashMap<String, String> = self
            .quizzes
            .find_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|quiz| (quiz.id, quiz.title))
            .collect();

        let average_percentage = if recent.is_empty() {
            0.0
        } else {
            round_one(recent.iter().map(|a| a.percentage).sum::<f64>() / recent.len() as f64)
        };

        let recent_attempts = recent
            .into_iter()
            .map(|attempt| RecentAttemptDto {
                quiz_title: titles
                    .get(&attempt.quiz_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown quiz".to_string()),
                attempt_id: attempt.id,
                quiz_id: attempt.quiz_id,
                score: attempt.score,
                max_score: attempt.max_score,
                percentage: attempt.percentage,
                completed_at: attempt.completed_at,
            })
            .collect();

        Ok(DashboardResponse {
            total_quizzes,
            total_attempts,
            average_percentage,
            recent_attempts,
        })
    }
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Attempt;
    use crate::repositories::attempt_repository::MockAttemptRepository;
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::test_utils::fixtures;

    #[tokio::test]
    async fn overview_with_no_attempts_reports_zero_average() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_count().returning(|| Ok(3));
        quizzes.expect_find_by_ids().returning(|_| Ok(vec![]));

        let mut attempts = MockAttemptRepository::new();
        attempts.expect_count_by_user().returning(|_| Ok(0));
        attempts
            .expect_find_recent_by_user()
            .returning(|_, _| Ok(vec![]));

        let service = DashboardService::new(Arc::new(quizzes), Arc::new(attempts));
        let overview = service.overview("user-1").await.unwrap();

        assert_eq!(overview.total_quizzes, 3);
        assert_eq!(overview.total_attempts, 0);
        assert_eq!(overview.average_percentage, 0.0);
        assert!(overview.recent_attempts.is_empty());
    }

    #[tokio::test]
    async fn overview_joins_quiz_titles_and_averages_to_one_decimal() {
        let quiz = fixtures::sample_quiz_with_id("quiz-1", "author-1");
        let quiz_title = quiz.title.clone();

        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_count().returning(|| Ok(1));
        quizzes
            .expect_find_by_ids()
            .returning(move |_| Ok(vec![quiz.clone()]));

        let mut attempts = MockAttemptRepository::new();
        attempts.expect_count_by_user().returning(|_| Ok(2));
        attempts.expect_find_recent_by_user().returning(|_, _| {
            Ok(vec![
                Attempt::new("quiz-1", "user-1", 2, 3, 66.67),
                Attempt::new("quiz-1", "user-1", 3, 3, 100.0),
            ])
        });

        let service = DashboardService::new(Arc::new(quizzes), Arc::new(attempts));
        let overview = service.overview("user-1").await.unwrap();

        assert_eq!(overview.total_attempts, 2);
        assert_eq!(overview.recent_attempts.len(), 2);
        assert_eq!(overview.recent_attempts[0].quiz_title, quiz_title);
        // (66.67 + 100.0) / 2 = 83.335, shown with one decimal
        assert_eq!(overview.average_percentage, 83.3);
    }
}
