use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Answer, Attempt, Question},
    models::dto::request::SubmitAttemptRequest,
    models::dto::response::{AnswerReviewDto, ResultsResponse},
    repositories::{AnswerRepository, AttemptRepository, QuestionRepository, QuizRepository},
};

/// One graded response, before it becomes a persisted `Answer`.
#[derive(Debug, Clone)]
pub struct GradedAnswer {
    pub question_id: String,
    pub user_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub struct GradedSubmission {
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
    pub answers: Vec<GradedAnswer>,
}

pub struct AttemptService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptRepository>,
    answers: Arc<dyn AnswerRepository>,
}

impl AttemptService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptRepository>,
        answers: Arc<dyn AnswerRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            attempts,
            answers,
        }
    }

    /// Both sides of every comparison go through this: surrounding
    /// whitespace is insignificant and matching is case-insensitive.
    pub fn normalize_answer(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Grade a full submission against the quiz's questions. Exactly one
    /// answer per question is required; matching is exact on the normalized
    /// strings, with no partial credit.
    pub fn grade_submission(
        questions: &[Question],
        submitted: &HashMap<String, String>,
    ) -> AppResult<GradedSubmission> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "Quiz has no questions".to_string(),
            ));
        }

        if submitted.len() != questions.len() {
            return Err(AppError::ValidationError(
                "Please answer all questions".to_string(),
            ));
        }

        let mut score = 0;
        let mut max_score = 0;
        let mut answers = Vec::with_capacity(questions.len());

        for question in questions {
            let user_answer = submitted.get(&question.id).ok_or_else(|| {
                AppError::ValidationError("Please answer all questions".to_string())
            })?;

            let is_correct = Self::normalize_answer(user_answer)
                == Self::normalize_answer(&question.correct_answer);
            if is_correct {
                score += question.points;
            }
            max_score += question.points;

            answers.push(GradedAnswer {
                question_id: question.id.clone(),
                user_answer: user_answer.clone(),
                is_correct,
            });
        }

        // Authoring validation keeps this unreachable; the guard keeps the
        // division below total.
        if max_score <= 0 {
            return Err(AppError::ValidationError(
                "Quiz has no points to award".to_string(),
            ));
        }

        let percentage = round_two(f64::from(score) / f64::from(max_score) * 100.0);

        Ok(GradedSubmission {
            score,
            max_score,
            percentage,
            answers,
        })
    }

    pub fn letter_grade(percentage: f64) -> &'static str {
        if percentage >= 90.0 {
            "A+"
        } else if percentage >= 80.0 {
            "A"
        } else if percentage >= 70.0 {
            "B"
        } else if percentage >= 60.0 {
            "C"
        } else {
            "D"
        }
    }

    /// Grade and persist a submission: one attempt row, then the answer
    /// batch. The writes are not transactional; a failed batch removes the
    /// attempt row again best-effort and no attempt id reaches the caller.
    pub async fn submit(
        &self,
        quiz_id: &str,
        user_id: &str,
        request: SubmitAttemptRequest,
    ) -> AppResult<Attempt> {
        let (quiz, questions) = futures::try_join!(
            self.quizzes.find_by_id(quiz_id),
            self.questions.find_by_quiz(quiz_id)
        )?;

        let quiz = quiz
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let graded = Self::grade_submission(&questions, &request.answers)?;

        let attempt = self
            .attempts
            .create(Attempt::new(
                &quiz.id,
                user_id,
                graded.score,
                graded.max_score,
                graded.percentage,
            ))
            .await?;

        let answer_rows: Vec<Answer> = graded
            .answers
            .iter()
            .map(|a| Answer::new(&attempt.id, &a.question_id, &a.user_answer, a.is_correct))
            .collect();

        match self.answers.create_many(answer_rows).await {
            Ok(_) => Ok(attempt),
            Err(err) => {
                log::warn!(
                    "Answer batch for attempt {} failed, removing the attempt row: {}",
                    attempt.id,
                    err
                );
                if let Err(cleanup_err) = self.attempts.delete(&attempt.id).await {
                    log::error!(
                        "Could not remove attempt {} after failed answer batch: {}",
                        attempt.id,
                        cleanup_err
                    );
                }
                Err(err)
            }
        }
    }

    /// The results view: attempt and answers fetched concurrently, then
    /// joined with the quiz and its questions. Owner-only; anyone else sees
    /// the same 404 as for a missing attempt.
    pub async fn results(&self, attempt_id: &str, user_id: &str) -> AppResult<ResultsResponse> {
        let (attempt, answers) = futures::try_join!(
            self.attempts.find_by_id(attempt_id),
            self.answers.find_by_attempt(attempt_id)
        )?;

        let attempt = attempt.ok_or_else(|| {
            AppError::NotFound(format!("Attempt with id '{}' not found", attempt_id))
        })?;

        if attempt.user_id != user_id {
            return Err(AppError::NotFound(format!(
                "Attempt with id '{}' not found",
                attempt_id
            )));
        }

        let (quiz, questions) = futures::try_join!(
            self.quizzes.find_by_id(&attempt.quiz_id),
            self.questions.find_by_quiz(&attempt.quiz_id)
        )?;

        let quiz = quiz.ok_or_else(|| {
            AppError::NotFound(format!("Quiz with id '{}' not found", attempt.quiz_id))
        })?;

        let by_id: HashMap<&str, &Question> =
            questions.iter().map(|q| (q.id.as_str(), q)).collect();

        let mut review = Vec::with_capacity(answers.len());
        for answer in &answers {
            let question = by_id.get(answer.question_id.as_str()).copied().ok_or_else(|| {
                AppError::InternalError(format!(
                    "Answer {} references unknown question {}",
                    answer.id, answer.question_id
                ))
            })?;
            review.push(AnswerReviewDto::from_parts(answer, question));
        }

        Ok(ResultsResponse {
            attempt_id: attempt.id,
            quiz_title: quiz.title,
            quiz_description: quiz.description,
            score: attempt.score,
            max_score: attempt.max_score,
            percentage: attempt.percentage,
            grade: Self::letter_grade(attempt.percentage).to_string(),
            answers: review,
            completed_at: attempt.completed_at,
        })
    }
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
