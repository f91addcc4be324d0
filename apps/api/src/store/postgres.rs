use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::SeoStore;
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

// Lists return rows in insertion order. `seq` is assigned per INSERT, so
// rows written in one transaction keep their relative order.
const LIST_CONTENT: &str = "SELECT * FROM seo_content WHERE user_id = $1 ORDER BY seq ASC";
const LIST_RANKINGS: &str = "SELECT * FROM rank_tracking WHERE user_id = $1 ORDER BY seq ASC";
const LIST_BACKLINKS: &str = "SELECT * FROM backlinks WHERE user_id = $1 ORDER BY seq ASC";
const LIST_KEYWORD_METRICS: &str =
    "SELECT * FROM keyword_analysis WHERE user_id = $1 ORDER BY seq ASC";
const LIST_CHAT: &str = "SELECT * FROM chat_logs WHERE user_id = $1 ORDER BY seq ASC";
/// The newest `$2` turns, returned oldest first.
const RECENT_CHAT: &str = r#"
    SELECT * FROM (
        SELECT * FROM chat_logs WHERE user_id = $1 ORDER BY seq DESC LIMIT $2
    ) recent
    ORDER BY seq ASC
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeoStore for PgStore {
    async fn insert_content(&self, new: NewContent) -> sqlx::Result<ContentRow> {
        sqlx::query_as(
            r#"
            INSERT INTO seo_content
                (user_id, title, content, keywords, language, status,
                 meta_description, url, page_type, target_audience)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(new.title)
        .bind(new.content)
        .bind(new.keywords)
        .bind(new.language)
        .bind(new.status)
        .bind(new.meta_description)
        .bind(new.url)
        .bind(new.page_type)
        .bind(new.target_audience)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_content(&self, user_id: Uuid) -> sqlx::Result<Vec<ContentRow>> {
        sqlx::query_as(LIST_CONTENT)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_content(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: ContentUpdate,
    ) -> sqlx::Result<Option<ContentRow>> {
        sqlx::query_as(
            r#"
            UPDATE seo_content SET
                title            = COALESCE($3, title),
                content          = COALESCE($4, content),
                status           = COALESCE($5, status),
                keywords         = COALESCE($6, keywords),
                meta_description = COALESCE($7, meta_description),
                updated_at       = clock_timestamp()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(update.title)
        .bind(update.content)
        .bind(update.status)
        .bind(update.keywords)
        .bind(update.meta_description)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_rankings(
        &self,
        user_id: Uuid,
        rankings: &[NewRanking],
    ) -> sqlx::Result<Vec<RankingRow>> {
        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(rankings.len());
        for ranking in rankings {
            let row: RankingRow = sqlx::query_as(
                r#"
                INSERT INTO rank_tracking (user_id, keyword, position, clicks, impressions, ctr)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(&ranking.keyword)
            .bind(ranking.position)
            .bind(ranking.clicks)
            .bind(ranking.impressions)
            .bind(ranking.ctr)
            .fetch_one(&mut *tx)
            .await?;
            rows.push(row);
        }
        tx.commit().await?;
        Ok(rows)
    }

    async fn list_rankings(&self, user_id: Uuid) -> sqlx::Result<Vec<RankingRow>> {
        sqlx::query_as(LIST_RANKINGS)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn list_backlinks(&self, user_id: Uuid) -> sqlx::Result<Vec<BacklinkRow>> {
        sqlx::query_as(LIST_BACKLINKS)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert_keyword_metrics(
        &self,
        user_id: Uuid,
        metrics: NewKeywordMetrics,
    ) -> sqlx::Result<KeywordMetricsRow> {
        sqlx::query_as(
            r#"
            INSERT INTO keyword_analysis (user_id, keyword, search_volume, difficulty, cpc, competition)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(metrics.keyword)
        .bind(metrics.search_volume)
        .bind(metrics.difficulty)
        .bind(metrics.cpc)
        .bind(metrics.competition)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_keyword_metrics(&self, user_id: Uuid) -> sqlx::Result<Vec<KeywordMetricsRow>> {
        sqlx::query_as(LIST_KEYWORD_METRICS)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn append_chat(&self, user_id: Uuid, turns: &[ChatTurn]) -> sqlx::Result<()> {
        let mut tx = self.pool.begin().await?;
        for turn in turns {
            sqlx::query("INSERT INTO chat_logs (user_id, role, content) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(turn.role.as_str())
                .bind(&turn.content)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await
    }

    async fn list_chat(&self, user_id: Uuid) -> sqlx::Result<Vec<ChatLogRow>> {
        sqlx::query_as(LIST_CHAT)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn recent_chat(&self, user_id: Uuid, limit: usize) -> sqlx::Result<Vec<ChatLogRow>> {
        sqlx::query_as(RECENT_CHAT)
            .bind(user_id)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
    }

    async fn insert_keyword_clusters(&self, record: NewKeywordClusters) -> sqlx::Result<Uuid> {
        sqlx::query_scalar(
            "INSERT INTO seo_data (user_id, keywords, clusters) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(record.user_id)
        .bind(record.keywords)
        .bind(record.clusters)
        .fetch_one(&self.pool)
        .await
    }

    async fn insert_serp_snapshot(&self, record: NewSerpSnapshot) -> sqlx::Result<Uuid> {
        sqlx::query_scalar(
            "INSERT INTO serp_results (user_id, keyword, results) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(record.user_id)
        .bind(record.keyword)
        .bind(record.results)
        .fetch_one(&self.pool)
        .await
    }

    async fn insert_backlink_audit(
        &self,
        record: NewBacklinkAudit,
        links: &[NewBacklink],
    ) -> sqlx::Result<Uuid> {
        let mut tx = self.pool.begin().await?;
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO backlink_audits (user_id, domain, toxic_links, opportunities, metrics)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(record.user_id)
        .bind(&record.domain)
        .bind(record.toxic_links)
        .bind(record.opportunities)
        .bind(record.metrics)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(user_id) = record.user_id {
            for link in links {
                sqlx::query(
                    r#"
                    INSERT INTO backlinks
                        (user_id, source_url, target_url, anchor_text,
                         domain_authority, page_authority, follow, status)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                    "#,
                )
                .bind(user_id)
                .bind(&link.source_url)
                .bind(&link.target_url)
                .bind(&link.anchor_text)
                .bind(link.domain_authority)
                .bind(link.page_authority)
                .bind(link.follow)
                .bind(&link.status)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(id)
    }

    async fn insert_technical_audit(&self, record: NewTechnicalAudit) -> sqlx::Result<Uuid> {
        sqlx::query_scalar(
            r#"
            INSERT INTO seo_audits (user_id, url, broken_links, meta_issues, performance, recommendations)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(record.user_id)
        .bind(record.url)
        .bind(record.broken_links)
        .bind(record.meta_issues)
        .bind(record.performance)
        .bind(record.recommendations)
        .fetch_one(&self.pool)
        .await
    }

    async fn insert_local_seo(&self, record: NewLocalSeoReport) -> sqlx::Result<Uuid> {
        sqlx::query_scalar(
            r#"
            INSERT INTO local_seo (user_id, business_name, gmb_data, local_keywords, recommendations)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(record.user_id)
        .bind(record.business_name)
        .bind(record.gmb_data)
        .bind(record.local_keywords)
        .bind(record.recommendations)
        .fetch_one(&self.pool)
        .await
    }

    async fn insert_social_impact(&self, record: NewSocialImpact) -> sqlx::Result<Uuid> {
        sqlx::query_scalar(
            r#"
            INSERT INTO social_media_impact (user_id, platforms, posts, analysis)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(record.user_id)
        .bind(record.platforms)
        .bind(record.posts)
        .bind(record.analysis)
        .fetch_one(&self.pool)
        .await
    }
}
