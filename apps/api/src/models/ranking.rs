use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RankingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub keyword: String,
    pub position: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRanking {
    pub keyword: String,
    pub position: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
}
