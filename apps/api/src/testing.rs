//! In-memory doubles for router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::data_sources::{
    DataSourceError, PageSpeedSummary, Platform, QueryRow, SeoDataSource, SerpResult, SocialPost,
};
use crate::llm_client::{ChatTurn, LlmError, TextGenerator};
use crate::models::backlink::{BacklinkRow, NewBacklink};
use crate::models::chat::ChatLogRow;
use crate::models::content::{ContentRow, ContentUpdate, NewContent};
use crate::models::keyword::{KeywordMetricsRow, NewKeywordMetrics};
use crate::models::ranking::{NewRanking, RankingRow};
use crate::models::report::{
    NewBacklinkAudit, NewKeywordClusters, NewLocalSeoReport, NewSerpSnapshot, NewSocialImpact,
    NewTechnicalAudit,
};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::SeoStore;

/// Replies with a fixed text, or fails every call when `reply` is `None`.
#[derive(Default)]
pub struct StubLlm {
    pub reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
    pub conversations: Mutex<Vec<Vec<ChatTurn>>>,
}

impl StubLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    fn answer(&self) -> Result<String, LlmError> {
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}

#[async_trait]
impl TextGenerator for StubLlm {
    async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer()
    }

    async fn chat(&self, _system: &str, turns: &[ChatTurn]) -> Result<String, LlmError> {
        self.conversations.lock().unwrap().push(turns.to_vec());
        self.answer()
    }
}

/// Canned provider data; `fail` makes every call return an API error.
#[derive(Default)]
pub struct StubData {
    pub serp: Vec<SerpResult>,
    pub backlinks: Value,
    pub page: String,
    pub page_speed: Option<PageSpeedSummary>,
    pub locations: Option<Value>,
    pub rows: Vec<QueryRow>,
    pub posts: Vec<SocialPost>,
    pub fail: bool,
}

impl StubData {
    fn check(&self) -> Result<(), DataSourceError> {
        if self.fail {
            return Err(DataSourceError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SeoDataSource for StubData {
    async fn organic_results(&self, _keyword: &str) -> Result<Vec<SerpResult>, DataSourceError> {
        self.check()?;
        Ok(self.serp.clone())
    }

    async fn backlinks(&self, _domain: &str) -> Result<Value, DataSourceError> {
        self.check()?;
        Ok(self.backlinks.clone())
    }

    async fn fetch_page(&self, _url: &str) -> Result<String, DataSourceError> {
        self.check()?;
        Ok(self.page.clone())
    }

    async fn page_speed(&self, _url: &str) -> Result<Option<PageSpeedSummary>, DataSourceError> {
        self.check()?;
        Ok(self.page_speed.clone())
    }

    async fn business_locations(&self) -> Result<Option<Value>, DataSourceError> {
        self.check()?;
        Ok(self.locations.clone())
    }

    async fn search_analytics(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<QueryRow>, DataSourceError> {
        self.check()?;
        Ok(self.rows.clone())
    }

    async fn social_posts(&self, platform: Platform) -> Result<Vec<SocialPost>, DataSourceError> {
        self.check()?;
        Ok(self
            .posts
            .iter()
            .filter(|post| post.platform == platform)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct Tables {
    pub content: Vec<ContentRow>,
    pub rankings: Vec<RankingRow>,
    pub backlinks: Vec<BacklinkRow>,
    pub keyword_metrics: Vec<KeywordMetricsRow>,
    pub chat: Vec<ChatLogRow>,
    pub keyword_clusters: Vec<NewKeywordClusters>,
    pub serp_snapshots: Vec<NewSerpSnapshot>,
    pub backlink_audits: Vec<NewBacklinkAudit>,
    pub technical_audits: Vec<NewTechnicalAudit>,
    pub local_reports: Vec<NewLocalSeoReport>,
    pub social_reports: Vec<NewSocialImpact>,
    /// `limit` of every `recent_chat` call.
    pub chat_reads: Vec<usize>,
}

/// Vector-backed store. With `fail` set, every write errors and nothing is kept.
#[derive(Default)]
pub struct MemoryStore {
    pub tables: Mutex<Tables>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> sqlx::Result<()> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl SeoStore for MemoryStore {
    async fn insert_content(&self, new: NewContent) -> sqlx::Result<ContentRow> {
        self.check()?;
        let now = Utc::now();
        let row = ContentRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            content: new.content,
            keywords: new.keywords,
            language: new.language,
            status: new.status,
            meta_description: new.meta_description,
            url: new.url,
            page_type: new.page_type,
            target_audience: new.target_audience,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().content.push(row.clone());
        Ok(row)
    }

    async fn list_content(&self, user_id: Uuid) -> sqlx::Result<Vec<ContentRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .content
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_content(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: ContentUpdate,
    ) -> sqlx::Result<Option<ContentRow>> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let Some(row) = tables
            .content
            .iter_mut()
            .find(|r| r.id == id && r.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            row.title = title;
        }
        if let Some(content) = update.content {
            row.content = content;
        }
        if let Some(status) = update.status {
            row.status = status;
        }
        if let Some(keywords) = update.keywords {
            row.keywords = keywords;
        }
        if let Some(meta) = update.meta_description {
            row.meta_description = Some(meta);
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn insert_rankings(
        &self,
        user_id: Uuid,
        rankings: &[NewRanking],
    ) -> sqlx::Result<Vec<RankingRow>> {
        self.check()?;
        let rows: Vec<RankingRow> = rankings
            .iter()
            .map(|r| RankingRow {
                id: Uuid::new_v4(),
                user_id,
                keyword: r.keyword.clone(),
                position: r.position,
                clicks: r.clicks,
                impressions: r.impressions,
                ctr: r.ctr,
                created_at: Utc::now(),
            })
            .collect();
        self.tables
            .lock()
            .unwrap()
            .rankings
            .extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn list_rankings(&self, user_id: Uuid) -> sqlx::Result<Vec<RankingRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .rankings
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_backlinks(&self, user_id: Uuid) -> sqlx::Result<Vec<BacklinkRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .backlinks
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_keyword_metrics(
        &self,
        user_id: Uuid,
        metrics: NewKeywordMetrics,
    ) -> sqlx::Result<KeywordMetricsRow> {
        self.check()?;
        let row = KeywordMetricsRow {
            id: Uuid::new_v4(),
            user_id,
            keyword: metrics.keyword,
            search_volume: metrics.search_volume,
            difficulty: metrics.difficulty,
            cpc: metrics.cpc,
            competition: metrics.competition,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().keyword_metrics.push(row.clone());
        Ok(row)
    }

    async fn list_keyword_metrics(&self, user_id: Uuid) -> sqlx::Result<Vec<KeywordMetricsRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .keyword_metrics
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn append_chat(&self, user_id: Uuid, turns: &[ChatTurn]) -> sqlx::Result<()> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        for turn in turns {
            tables.chat.push(ChatLogRow {
                id: Uuid::new_v4(),
                user_id,
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn list_chat(&self, user_id: Uuid) -> sqlx::Result<Vec<ChatLogRow>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .chat
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn recent_chat(&self, user_id: Uuid, limit: usize) -> sqlx::Result<Vec<ChatLogRow>> {
        let mut tables = self.tables.lock().unwrap();
        tables.chat_reads.push(limit);
        let rows: Vec<ChatLogRow> = tables
            .chat
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        let skip = rows.len().saturating_sub(limit);
        Ok(rows.into_iter().skip(skip).collect())
    }

    async fn insert_keyword_clusters(&self, record: NewKeywordClusters) -> sqlx::Result<Uuid> {
        self.check()?;
        self.tables.lock().unwrap().keyword_clusters.push(record);
        Ok(Uuid::new_v4())
    }

    async fn insert_serp_snapshot(&self, record: NewSerpSnapshot) -> sqlx::Result<Uuid> {
        self.check()?;
        self.tables.lock().unwrap().serp_snapshots.push(record);
        Ok(Uuid::new_v4())
    }

    async fn insert_backlink_audit(
        &self,
        record: NewBacklinkAudit,
        links: &[NewBacklink],
    ) -> sqlx::Result<Uuid> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        if let Some(user_id) = record.user_id {
            for link in links {
                tables.backlinks.push(BacklinkRow {
                    id: Uuid::new_v4(),
                    user_id,
                    source_url: link.source_url.clone(),
                    target_url: link.target_url.clone(),
                    anchor_text: link.anchor_text.clone(),
                    domain_authority: link.domain_authority,
                    page_authority: link.page_authority,
                    follow: link.follow,
                    status: link.status.clone(),
                    created_at: Utc::now(),
                });
            }
        }
        tables.backlink_audits.push(record);
        Ok(Uuid::new_v4())
    }

    async fn insert_technical_audit(&self, record: NewTechnicalAudit) -> sqlx::Result<Uuid> {
        self.check()?;
        self.tables.lock().unwrap().technical_audits.push(record);
        Ok(Uuid::new_v4())
    }

    async fn insert_local_seo(&self, record: NewLocalSeoReport) -> sqlx::Result<Uuid> {
        self.check()?;
        self.tables.lock().unwrap().local_reports.push(record);
        Ok(Uuid::new_v4())
    }

    async fn insert_social_impact(&self, record: NewSocialImpact) -> sqlx::Result<Uuid> {
        self.check()?;
        self.tables.lock().unwrap().social_reports.push(record);
        Ok(Uuid::new_v4())
    }
}

/// Test harness holding the doubles so assertions can inspect them after a request.
pub struct TestApp {
    pub llm: Arc<StubLlm>,
    pub data: Arc<StubData>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new(llm: StubLlm, data: StubData, store: MemoryStore) -> Self {
        Self {
            llm: Arc::new(llm),
            data: Arc::new(data),
            store: Arc::new(store),
        }
    }

    pub fn with_reply(text: &str) -> Self {
        Self::new(
            StubLlm::replying(text),
            StubData::default(),
            MemoryStore::default(),
        )
    }

    pub fn router(&self) -> Router {
        build_router(AppState {
            llm: self.llm.clone(),
            data: self.data.clone(),
            store: self.store.clone(),
        })
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, Body::from(body.to_string()))
            .await
    }

    pub async fn patch(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, path, Body::from(body.to_string()))
            .await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> (StatusCode, Value) {
        self.send(Method::POST, path, Body::from(body)).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(Method::GET, path, Body::empty()).await
    }

    async fn send(&self, method: Method, path: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
