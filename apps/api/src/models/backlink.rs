use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BacklinkRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub source_url: String,
    pub target_url: String,
    pub anchor_text: Option<String>,
    pub domain_authority: Option<f64>,
    pub page_authority: Option<f64>,
    pub follow: bool,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBacklink {
    pub source_url: String,
    pub target_url: String,
    pub anchor_text: Option<String>,
    pub domain_authority: Option<f64>,
    pub page_authority: Option<f64>,
    pub follow: bool,
    pub status: Option<String>,
}
