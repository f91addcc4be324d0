use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_DRAFT: &str = "draft";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub language: String,
    pub status: String,
    pub meta_description: Option<String>,
    pub url: Option<String>,
    pub page_type: Option<String>,
    pub target_audience: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContent {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub meta_description: Option<String>,
    pub url: Option<String>,
    pub page_type: Option<String>,
    pub target_audience: Option<String>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_status() -> String {
    STATUS_DRAFT.to_string()
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub meta_description: Option<String>,
}

impl ContentUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.status.is_none()
            && self.keywords.is_none()
            && self.meta_description.is_none()
    }

    /// True when the update would leave the title or body empty.
    pub fn blanks_required_field(&self) -> bool {
        [&self.title, &self.content]
            .into_iter()
            .flatten()
            .any(|value| value.trim().is_empty())
    }
}
