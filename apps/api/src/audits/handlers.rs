//! Axum route handlers for the Audit API.

use axum::extract::State;
use chrono::Utc;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::audits::backlinks::{analyze_backlinks, link_records, BacklinkAnalysis};
use crate::audits::local::{analyze_local_presence, LocalSeoAnalysis};
use crate::audits::rankings::{to_rankings, tracking_window};
use crate::audits::social::{analyze_social, SocialAnalysis};
use crate::audits::technical::{run_audit, TechnicalAudit};
use crate::data_sources::{moz::extract_links, Platform, SerpResult};
use crate::errors::AppError;
use crate::models::backlink::BacklinkRow;
use crate::models::ranking::RankingRow;
use crate::models::report::{
    NewBacklinkAudit, NewLocalSeoReport, NewSerpSnapshot, NewSocialImpact, NewTechnicalAudit,
};
use crate::response::{
    present, present_list, success, to_json, ApiJson, ApiQuery, ApiResult, Items, UserScope,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SerpRequest {
    pub keyword: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SerpResponse {
    pub results: Vec<SerpResult>,
}

#[derive(Debug, Deserialize)]
pub struct BacklinkRequest {
    pub domain: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct BacklinkResponse {
    pub analysis: BacklinkAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct TechnicalAuditRequest {
    pub url: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalAuditResponse {
    pub audit_results: TechnicalAudit,
}

#[derive(Debug, Deserialize)]
pub struct LocalSeoRequest {
    #[serde(alias = "businessName")]
    pub business_name: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct LocalSeoResponse {
    pub analysis: LocalSeoAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct SocialMediaRequest {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
    pub platforms: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SocialMediaResponse {
    pub analysis: SocialAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct TrackRankingsRequest {
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TrackRankingsResponse {
    pub rankings: Vec<RankingRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze-serp
pub async fn handle_analyze_serp(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SerpRequest>,
) -> ApiResult<SerpResponse> {
    let keyword = present(request.keyword.as_deref())
        .ok_or_else(|| AppError::Validation("Missing keyword".to_string()))?;

    let results = state.data.organic_results(keyword).await?;

    state
        .store
        .insert_serp_snapshot(NewSerpSnapshot {
            user_id: request.user_id,
            keyword: keyword.to_string(),
            results: to_json(&results)?,
        })
        .await?;

    success(SerpResponse { results })
}

/// POST /api/v1/analyze-backlinks
///
/// Pulls the domain's inbound links, asks the model for toxic links and
/// opportunities, and records the audit. With a user, the individual links
/// are stored as backlink records too.
pub async fn handle_analyze_backlinks(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BacklinkRequest>,
) -> ApiResult<BacklinkResponse> {
    let domain = present(request.domain.as_deref())
        .ok_or_else(|| AppError::Validation("Domain is required".to_string()))?;

    let payload = state.data.backlinks(domain).await?;
    let analysis = analyze_backlinks(state.llm.as_ref(), domain, &payload).await?;
    let links = link_records(extract_links(&payload, domain), &analysis);

    state
        .store
        .insert_backlink_audit(
            NewBacklinkAudit {
                user_id: request.user_id,
                domain: domain.to_string(),
                toxic_links: to_json(&analysis.toxic_links)?,
                opportunities: to_json(&analysis.opportunities)?,
                metrics: to_json(&analysis.metrics)?,
            },
            &links,
        )
        .await?;
    info!(
        "Backlink audit for {domain}: {} links, {} toxic",
        links.len(),
        analysis.toxic_links.len()
    );

    success(BacklinkResponse { analysis })
}

/// POST /api/v1/technical-seo-audit
pub async fn handle_technical_audit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TechnicalAuditRequest>,
) -> ApiResult<TechnicalAuditResponse> {
    let url = present(request.url.as_deref())
        .ok_or_else(|| AppError::Validation("URL is required".to_string()))?;
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => {
            return Err(AppError::Validation(
                "URL must be an absolute http(s) URL".to_string(),
            ))
        }
    }

    let page = state.data.fetch_page(url).await?;
    let page_speed = state.data.page_speed(url).await?;
    let audit = run_audit(state.llm.as_ref(), url, &page, page_speed.as_ref()).await?;

    state
        .store
        .insert_technical_audit(NewTechnicalAudit {
            user_id: request.user_id,
            url: url.to_string(),
            broken_links: to_json(&audit.broken_links)?,
            meta_issues: to_json(&audit.meta_issues)?,
            performance: to_json(&audit.performance)?,
            recommendations: to_json(&audit.recommendations)?,
        })
        .await?;

    success(TechnicalAuditResponse {
        audit_results: audit,
    })
}

/// POST /api/v1/local-seo-analysis
pub async fn handle_local_seo(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LocalSeoRequest>,
) -> ApiResult<LocalSeoResponse> {
    let business_name = present(request.business_name.as_deref())
        .ok_or_else(|| AppError::Validation("Business name is required".to_string()))?;

    let listing = state.data.business_locations().await?;
    let analysis =
        analyze_local_presence(state.llm.as_ref(), business_name, listing.as_ref()).await?;

    state
        .store
        .insert_local_seo(NewLocalSeoReport {
            user_id: request.user_id,
            business_name: business_name.to_string(),
            gmb_data: to_json(&analysis.gmb_data)?,
            local_keywords: to_json(&analysis.local_keywords)?,
            recommendations: to_json(&analysis.recommendations)?,
        })
        .await?;

    success(LocalSeoResponse { analysis })
}

/// POST /api/v1/analyze-social-media
///
/// Pulls recent posts from each requested platform and records the model's
/// reading of their engagement alongside the posts.
pub async fn handle_analyze_social(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SocialMediaRequest>,
) -> ApiResult<SocialMediaResponse> {
    let names = present_list(request.platforms.as_deref());
    let (Some(user_id), Some(names)) = (request.user_id, names) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let mut platforms: Vec<Platform> = Vec::with_capacity(names.len());
    for name in &names {
        let platform = Platform::parse(name)
            .ok_or_else(|| AppError::Validation(format!("Unsupported platform: {name}")))?;
        if !platforms.contains(&platform) {
            platforms.push(platform);
        }
    }

    let mut posts = Vec::new();
    for platform in &platforms {
        posts.extend(state.data.social_posts(*platform).await?);
    }
    let analysis = analyze_social(state.llm.as_ref(), &posts).await?;

    state
        .store
        .insert_social_impact(NewSocialImpact {
            user_id,
            platforms: platforms.iter().map(|p| p.as_str().to_string()).collect(),
            posts: to_json(&posts)?,
            analysis: to_json(&analysis)?,
        })
        .await?;
    info!(
        "Analysed {} social posts across {} platforms for user {user_id}",
        posts.len(),
        platforms.len()
    );

    success(SocialMediaResponse { analysis })
}

/// POST /api/v1/track-rankings
///
/// Imports the last 30 days of search performance as rank-tracking records.
pub async fn handle_track_rankings(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TrackRankingsRequest>,
) -> ApiResult<TrackRankingsResponse> {
    let user_id = request
        .user_id
        .ok_or_else(|| AppError::Validation("Missing required fields".to_string()))?;

    let (start, end) = tracking_window(Utc::now().date_naive());
    let rows = state.data.search_analytics(start, end).await?;
    let rankings = state
        .store
        .insert_rankings(user_id, &to_rankings(rows))
        .await?;
    info!("Tracked {} keywords for user {user_id}", rankings.len());

    success(TrackRankingsResponse { rankings })
}

/// GET /api/v1/rankings?user_id=
pub async fn handle_list_rankings(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<UserScope>,
) -> ApiResult<Items<RankingRow>> {
    let items = state.store.list_rankings(scope.user_id).await?;
    success(Items { items })
}

/// GET /api/v1/backlinks?user_id=
pub async fn handle_list_backlinks(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<UserScope>,
) -> ApiResult<Items<BacklinkRow>> {
    let items = state.store.list_backlinks(scope.user_id).await?;
    success(Items { items })
}
