//! Snapshot rows written by the analysis endpoints.
//! Results are stored as JSON exactly as returned to the caller.

use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewKeywordClusters {
    pub user_id: Uuid,
    pub keywords: Vec<String>,
    pub clusters: Value,
}

#[derive(Debug, Clone)]
pub struct NewSerpSnapshot {
    pub user_id: Option<Uuid>,
    pub keyword: String,
    pub results: Value,
}

#[derive(Debug, Clone)]
pub struct NewBacklinkAudit {
    pub user_id: Option<Uuid>,
    pub domain: String,
    pub toxic_links: Value,
    pub opportunities: Value,
    pub metrics: Value,
}

#[derive(Debug, Clone)]
pub struct NewTechnicalAudit {
    pub user_id: Option<Uuid>,
    pub url: String,
    pub broken_links: Value,
    pub meta_issues: Value,
    pub performance: Value,
    pub recommendations: Value,
}

#[derive(Debug, Clone)]
pub struct NewLocalSeoReport {
    pub user_id: Option<Uuid>,
    pub business_name: String,
    pub gmb_data: Value,
    pub local_keywords: Value,
    pub recommendations: Value,
}

#[derive(Debug, Clone)]
pub struct NewSocialImpact {
    pub user_id: Uuid,
    pub platforms: Vec<String>,
    pub posts: Value,
    pub analysis: Value,
}
