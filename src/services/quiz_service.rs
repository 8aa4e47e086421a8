use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, Quiz},
    models::dto::request::CreateQuizRequest,
    models::dto::response::QuizSummaryDto,
    repositories::{QuestionRepository, QuizRepository, UserRepository},
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            users,
        }
    }

    /// Authoring checks, run before any write. Messages name the offending
    /// question so the caller can surface them inline.
    fn validate_draft(request: &CreateQuizRequest) -> AppResult<()> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Please enter a quiz title".to_string(),
            ));
        }

        if request.questions.is_empty() {
            return Err(AppError::ValidationError(
                "Please add at least one question".to_string(),
            ));
        }

        for (idx, question) in request.questions.iter().enumerate() {
            if question.question_text.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Question {} is empty",
                    idx + 1
                )));
            }
            if question.correct_answer.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Question {} needs a correct answer",
                    idx + 1
                )));
            }
            if question.points < 1 {
                return Err(AppError::ValidationError(format!(
                    "Question {} must be worth at least one point",
                    idx + 1
                )));
            }
        }

        Ok(())
    }

    /// Persist a validated draft as a quiz row followed by its question
    /// batch. The writes are not transactional; if the batch fails the quiz
    /// row is removed again best-effort and the failure is returned.
    pub async fn create_quiz(
        &self,
        request: CreateQuizRequest,
        creator_id: &str,
    ) -> AppResult<(Quiz, Vec<Question>)> {
        Self::validate_draft(&request)?;

        let description = request.description.filter(|d| !d.trim().is_empty());
        let quiz = Quiz::new(
            &request.title,
            description,
            creator_id,
            request.is_public.unwrap_or(true),
        );

        let questions: Vec<Question> = request
            .questions
            .into_iter()
            .enumerate()
            .map(|(idx, input)| {
                Question::new(
                    &quiz.id,
                    &input.question_text,
                    input.kind,
                    &input.correct_answer,
                    input.points,
                    idx as i32,
                )
            })
            .collect();

        let quiz = self.quizzes.create(quiz).await?;

        match self.questions.create_many(questions).await {
            Ok(questions) => Ok((quiz, questions)),
            Err(err) => {
                log::warn!(
                    "Question batch for quiz {} failed, removing the quiz row: {}",
                    quiz.id,
                    err
                );
                if let Err(cleanup_err) = self.quizzes.delete(&quiz.id).await {
                    log::error!(
                        "Could not remove quiz {} after failed question batch: {}",
                        quiz.id,
                        cleanup_err
                    );
                }
                Err(err)
            }
        }
    }

    /// The public catalog, newest first, each entry joined with its
    /// creator's username. The search term filters the already-fetched set.
    pub async fn browse(&self, search: Option<&str>) -> AppResult<Vec<QuizSummaryDto>> {
        let quizzes = self.quizzes.list_public().await?;

        let mut creator_ids: Vec<String> = quizzes.iter().map(|q| q.creator_id.clone()).collect();
        creator_ids.sort();
        creator_ids.dedup();

        let creators: HashMap<String, String> = self
            .users
            .find_by_ids(&creator_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();

        let summaries = quizzes
            .into_iter()
            .map(|quiz| QuizSummaryDto {
                author: creators
                    .get(&quiz.creator_id)
                    .cloned()
                    .unwrap_or_else(|| "Anonymous".to_string()),
                id: quiz.id,
                title: quiz.title,
                description: quiz.description,
                created_at: quiz.created_at,
            })
            .collect();

        Ok(Self::filter_by_title(summaries, search))
    }

    /// Case-insensitive substring filter over the fetched set. An absent or
    /// blank term returns the set untouched, in fetch order.
    fn filter_by_title(
        summaries: Vec<QuizSummaryDto>,
        search: Option<&str>,
    ) -> Vec<QuizSummaryDto> {
        match search.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => {
                let term = term.to_lowercase();
                summaries
                    .into_iter()
                    .filter(|summary| summary.title.to_lowercase().contains(&term))
                    .collect()
            }
            None => summaries,
        }
    }

    /// A quiz and its questions in display order, fetched concurrently.
    pub async fn get_quiz_with_questions(&self, id: &str) -> AppResult<(Quiz, Vec<Question>)> {
        let (quiz, questions) = futures::try_join!(
            self.quizzes.find_by_id(id),
            self.questions.find_by_quiz(id)
        )?;

        let quiz =
            quiz.ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        Ok((quiz, questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuestionKind;
    use crate::models::dto::request::QuestionInput;
    use crate::repositories::question_repository::MockQuestionRepository;
    use crate::repositories::quiz_repository::MockQuizRepository;
    use crate::repositories::user_repository::MockUserRepository;

    fn question_input(text: &str, correct: &str, points: i32) -> QuestionInput {
        QuestionInput {
            question_text: text.to_string(),
            kind: QuestionKind::ShortAnswer,
            correct_answer: correct.to_string(),
            points,
        }
    }

    fn draft(questions: Vec<QuestionInput>) -> CreateQuizRequest {
        CreateQuizRequest {
            title: "Rust basics".to_string(),
            description: None,
            is_public: None,
            questions,
        }
    }

    fn service_with(
        quizzes: MockQuizRepository,
        questions: MockQuestionRepository,
    ) -> QuizService {
        QuizService::new(
            Arc::new(quizzes),
            Arc::new(questions),
            Arc::new(MockUserRepository::new()),
        )
    }

    fn assert_validation_error(result: AppResult<(Quiz, Vec<Question>)>, expected: &str) {
        match result {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, expected),
            other => panic!("Expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn create_rejects_blank_title_before_any_write() {
        let service = service_with(MockQuizRepository::new(), MockQuestionRepository::new());

        let mut request = draft(vec![question_input("2 + 2?", "4", 1)]);
        request.title = "   ".to_string();

        assert_validation_error(
            service.create_quiz(request, "user-1").await,
            "Please enter a quiz title",
        );
    }

    #[tokio::test]
    async fn create_rejects_empty_question_list() {
        let service = service_with(MockQuizRepository::new(), MockQuestionRepository::new());

        assert_validation_error(
            service.create_quiz(draft(vec![]), "user-1").await,
            "Please add at least one question",
        );
    }

    #[tokio::test]
    async fn create_names_the_offending_question() {
        let service = service_with(MockQuizRepository::new(), MockQuestionRepository::new());

        let blank_text = draft(vec![
            question_input("2 + 2?", "4", 1),
            question_input("  ", "4", 1),
        ]);
        assert_validation_error(
            service.create_quiz(blank_text, "user-1").await,
            "Question 2 is empty",
        );

        let blank_answer = draft(vec![question_input("2 + 2?", "  ", 1)]);
        assert_validation_error(
            service.create_quiz(blank_answer, "user-1").await,
            "Question 1 needs a correct answer",
        );

        let zero_points = draft(vec![question_input("2 + 2?", "4", 0)]);
        assert_validation_error(
            service.create_quiz(zero_points, "user-1").await,
            "Question 1 must be worth at least one point",
        );
    }

    #[tokio::test]
    async fn questions_get_their_list_position_as_order_index() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_create().returning(Ok);
        let mut questions = MockQuestionRepository::new();
        questions.expect_create_many().returning(Ok);

        let service = service_with(quizzes, questions);
        let request = draft(vec![
            question_input("first", "a", 1),
            question_input("second", "b", 2),
            question_input("third", "c", 3),
        ]);

        let (quiz, created) = service.create_quiz(request, "user-1").await.unwrap();

        assert_eq!(created.len(), 3);
        for (idx, question) in created.iter().enumerate() {
            assert_eq!(question.order_index, idx as i32);
            assert_eq!(question.quiz_id, quiz.id);
        }
    }

    #[tokio::test]
    async fn failed_question_batch_removes_the_quiz_row() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_create().returning(Ok);
        quizzes
            .expect_delete()
            .times(1)
            .returning(|_| Ok(()));

        let mut questions = MockQuestionRepository::new();
        questions
            .expect_create_many()
            .returning(|_| Err(AppError::DatabaseError("insert_many failed".to_string())));

        let service = service_with(quizzes, questions);
        let result = service
            .create_quiz(draft(vec![question_input("2 + 2?", "4", 1)]), "user-1")
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[test]
    fn filter_is_case_insensitive_and_empty_term_is_identity() {
        let summaries = vec![
            QuizSummaryDto {
                id: "1".to_string(),
                title: "Rust Ownership".to_string(),
                description: None,
                author: "alice".to_string(),
                created_at: None,
            },
            QuizSummaryDto {
                id: "2".to_string(),
                title: "French cooking".to_string(),
                description: None,
                author: "bob".to_string(),
                created_at: None,
            },
        ];

        let filtered = QuizService::filter_by_title(summaries.clone(), Some("rUsT"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");

        let unfiltered = QuizService::filter_by_title(summaries.clone(), Some(""));
        assert_eq!(unfiltered.len(), 2);
        assert_eq!(unfiltered[0].id, "1");
        assert_eq!(unfiltered[1].id, "2");

        let no_match = QuizService::filter_by_title(summaries, Some("quantum"));
        assert!(no_match.is_empty());
    }
}
