//! Persistence seam. Handlers talk to `SeoStore`; `PgStore` is the
//! PostgreSQL implementation. Every read is scoped to one user and returned
//! in insertion order.

use async_trait::async_trait;
use uuid::Uuid;

use crate::llm_client::ChatTurn;
use crate::models::backlink::{BacklinkRow, NewBacklink};
use crate::models::chat::ChatLogRow;
use crate::models::content::{ContentRow, ContentUpdate, NewContent};
use crate::models::keyword::{KeywordMetricsRow, NewKeywordMetrics};
use crate::models::ranking::{NewRanking, RankingRow};
use crate::models::report::{
    NewBacklinkAudit, NewKeywordClusters, NewLocalSeoReport, NewSerpSnapshot, NewSocialImpact,
    NewTechnicalAudit,
};

pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait SeoStore: Send + Sync {
    async fn insert_content(&self, new: NewContent) -> sqlx::Result<ContentRow>;
    async fn list_content(&self, user_id: Uuid) -> sqlx::Result<Vec<ContentRow>>;
    /// Returns `None` when the record does not exist or belongs to someone else.
    async fn update_content(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: ContentUpdate,
    ) -> sqlx::Result<Option<ContentRow>>;

    async fn insert_rankings(
        &self,
        user_id: Uuid,
        rankings: &[NewRanking],
    ) -> sqlx::Result<Vec<RankingRow>>;
    async fn list_rankings(&self, user_id: Uuid) -> sqlx::Result<Vec<RankingRow>>;

    async fn list_backlinks(&self, user_id: Uuid) -> sqlx::Result<Vec<BacklinkRow>>;

    async fn insert_keyword_metrics(
        &self,
        user_id: Uuid,
        metrics: NewKeywordMetrics,
    ) -> sqlx::Result<KeywordMetricsRow>;
    async fn list_keyword_metrics(&self, user_id: Uuid) -> sqlx::Result<Vec<KeywordMetricsRow>>;

    /// Appends turns atomically, in slice order.
    async fn append_chat(&self, user_id: Uuid, turns: &[ChatTurn]) -> sqlx::Result<()>;
    async fn list_chat(&self, user_id: Uuid) -> sqlx::Result<Vec<ChatLogRow>>;
    /// The newest `limit` turns, oldest first.
    async fn recent_chat(&self, user_id: Uuid, limit: usize) -> sqlx::Result<Vec<ChatLogRow>>;

    async fn insert_keyword_clusters(&self, record: NewKeywordClusters) -> sqlx::Result<Uuid>;
    async fn insert_serp_snapshot(&self, record: NewSerpSnapshot) -> sqlx::Result<Uuid>;
    /// Writes the audit and, when the audit is owned by a user, the
    /// individual links, in one transaction.
    async fn insert_backlink_audit(
        &self,
        record: NewBacklinkAudit,
        links: &[NewBacklink],
    ) -> sqlx::Result<Uuid>;
    async fn insert_technical_audit(&self, record: NewTechnicalAudit) -> sqlx::Result<Uuid>;
    async fn insert_local_seo(&self, record: NewLocalSeoReport) -> sqlx::Result<Uuid>;
    async fn insert_social_impact(&self, record: NewSocialImpact) -> sqlx::Result<Uuid>;
}
