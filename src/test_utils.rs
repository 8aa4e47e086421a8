use crate::models::domain::{Question, QuestionKind, Quiz};

pub mod fixtures {
    use super::*;

    /// A public quiz with a fixed id, for wiring mocks.
    pub fn sample_quiz_with_id(id: &str, creator_id: &str) -> Quiz {
        let mut quiz = Quiz::new(
            "Rust basics",
            Some("Bindings and arithmetic".to_string()),
            creator_id,
            true,
        );
        quiz.id = id.to_string();
        quiz
    }

    /// The canonical two-question quiz: a 2-point mcq answered "let" and a
    /// 3-point short answer answered "four".
    pub fn sample_questions(quiz_id: &str) -> Vec<Question> {
        vec![
            Question::new(
                quiz_id,
                "Which keyword declares an immutable binding?",
                QuestionKind::Mcq {
                    options: vec![
                        "let".to_string(),
                        "mut".to_string(),
                        "static".to_string(),
                        "const".to_string(),
                    ],
                },
                "let",
                2,
                0,
            ),
            Question::new(
                quiz_id,
                "Two plus two, in words?",
                QuestionKind::ShortAnswer,
                "four",
                3,
                1,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn sample_questions_are_ordered_and_worth_five_points() {
        let questions = sample_questions("quiz-1");

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].order_index, 0);
        assert_eq!(questions[1].order_index, 1);
        assert_eq!(questions.iter().map(|q| q.points).sum::<i32>(), 5);
    }

    #[test]
    fn sample_quiz_uses_the_given_id() {
        let quiz = sample_quiz_with_id("quiz-42", "user-1");
        assert_eq!(quiz.id, "quiz-42");
        assert!(quiz.is_public);
    }
}
