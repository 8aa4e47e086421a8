use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Quiz};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>>;
    /// All public quizzes, newest first.
    async fn list_public(&self) -> AppResult<Vec<Quiz>>;
    async fn count(&self) -> AppResult<i64>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn list_public(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "is_public": true })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn count(&self) -> AppResult<i64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count as i64)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let catalog_index = IndexModel::builder()
            .keys(doc! { "is_public": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("catalog".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(catalog_index).await?;

        Ok(())
    }
}
