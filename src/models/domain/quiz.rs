use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub creator_id: String,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(title: &str, description: Option<String>, creator_id: &str, is_public: bool) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description,
            creator_id: creator_id.to_string(),
            is_public,
            created_at: Some(Utc::now()),
        }
    }
}
