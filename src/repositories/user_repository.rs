use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        let users = self
            .collection
            .find(doc! { "id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(users)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for users collection");

        for field in ["id", "username", "email"] {
            let mut keys = mongodb::bson::Document::new();
            keys.insert(field, 1);

            let options = IndexOptions::builder()
                .unique(true)
                .name(format!("{}_unique", field))
                .build();
            let model = IndexModel::builder().keys(keys).options(options).build();
            self.collection.create_index(model).await?;
        }

        Ok(())
    }
}
