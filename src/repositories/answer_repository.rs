use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Answer};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Batch insert of an attempt's graded answers.
    async fn create_many(&self, answers: Vec<Answer>) -> AppResult<Vec<Answer>>;
    /// An attempt's answers in creation order.
    async fn find_by_attempt(&self, attempt_id: &str) -> AppResult<Vec<Answer>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAnswerRepository {
    collection: Collection<Answer>,
}

impl MongoAnswerRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("answers");
        Self { collection }
    }
}

#[async_trait]
impl AnswerRepository for MongoAnswerRepository {
    async fn create_many(&self, answers: Vec<Answer>) -> AppResult<Vec<Answer>> {
        if answers.is_empty() {
            return Ok(answers);
        }
        self.collection.insert_many(&answers).await?;
        Ok(answers)
    }

    async fn find_by_attempt(&self, attempt_id: &str) -> AppResult<Vec<Answer>> {
        let answers = self
            .collection
            .find(doc! { "attempt_id": attempt_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(answers)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for answers collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let attempt_index = IndexModel::builder()
            .keys(doc! { "attempt_id": 1, "created_at": 1 })
            .options(
                IndexOptions::builder()
                    .name("attempt_order".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(attempt_index).await?;

        Ok(())
    }
}
