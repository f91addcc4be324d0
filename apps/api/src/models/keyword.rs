use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KeywordMetricsRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub keyword: String,
    pub search_volume: i64,
    pub difficulty: f64,
    pub cpc: f64,
    pub competition: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewKeywordMetrics {
    pub keyword: String,
    pub search_volume: i64,
    pub difficulty: f64,
    pub cpc: f64,
    pub competition: f64,
}
