use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Attempt};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>>;
    /// A user's most recent attempts, newest first.
    async fn find_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<Attempt>>;
    async fn count_by_user(&self, user_id: &str) -> AppResult<i64>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_attempts");
        Self { collection }
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn find_recent_by_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "completed_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id })
            .await?;
        Ok(count as i64)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_recent_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "completed_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_recent".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_recent_index).await?;

        Ok(())
    }
}
