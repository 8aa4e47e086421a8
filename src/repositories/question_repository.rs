use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Question};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Batch insert of a quiz's questions, written once at authoring time.
    async fn create_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>>;
    /// A quiz's questions in display/grading order.
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self { collection }
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create_many(&self, questions: Vec<Question>) -> AppResult<Vec<Question>> {
        if questions.is_empty() {
            return Ok(questions);
        }
        self.collection.insert_many(&questions).await?;
        Ok(questions)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        let questions = self
            .collection
            .find(doc! { "quiz_id": quiz_id })
            .sort(doc! { "order_index": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let order_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "order_index": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_order_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(order_index).await?;

        Ok(())
    }
}
