//! Axum route handlers for the Keyword API.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::keywords::clustering::{cluster_keywords, IntentClusters};
use crate::models::keyword::{KeywordMetricsRow, NewKeywordMetrics};
use crate::models::report::NewKeywordClusters;
use crate::response::{
    present, present_list, success, to_json, ApiJson, ApiQuery, ApiResult, Items, UserScope,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeKeywordsRequest {
    pub keywords: Option<Vec<String>>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeKeywordsResponse {
    pub clusters: IntentClusters,
}

#[derive(Debug, Deserialize)]
pub struct KeywordMetricsRequest {
    pub user_id: Uuid,
    pub keyword: Option<String>,
    #[serde(default)]
    pub search_volume: i64,
    #[serde(default)]
    pub difficulty: f64,
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub competition: f64,
}

#[derive(Debug, Serialize)]
pub struct KeywordMetricsItem {
    pub item: KeywordMetricsRow,
}

/// POST /api/v1/analyze-keywords
///
/// Groups keywords by search intent and records the clustering for the user.
pub async fn handle_analyze_keywords(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeKeywordsRequest>,
) -> ApiResult<AnalyzeKeywordsResponse> {
    let (Some(keywords), Some(user_id)) =
        (present_list(request.keywords.as_deref()), request.user_id)
    else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let clusters = cluster_keywords(state.llm.as_ref(), &keywords).await?;

    state
        .store
        .insert_keyword_clusters(NewKeywordClusters {
            user_id,
            keywords,
            clusters: to_json(&clusters)?,
        })
        .await?;

    success(AnalyzeKeywordsResponse { clusters })
}

/// GET /api/v1/keyword-metrics?user_id=
pub async fn handle_list_keyword_metrics(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<UserScope>,
) -> ApiResult<Items<KeywordMetricsRow>> {
    let items = state.store.list_keyword_metrics(scope.user_id).await?;
    success(Items { items })
}

/// POST /api/v1/keyword-metrics
pub async fn handle_create_keyword_metrics(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<KeywordMetricsRequest>,
) -> ApiResult<KeywordMetricsItem> {
    let keyword = present(request.keyword.as_deref())
        .ok_or_else(|| AppError::Validation("Keyword is required".to_string()))?
        .to_string();
    if request.search_volume < 0
        || request.difficulty < 0.0
        || request.cpc < 0.0
        || request.competition < 0.0
    {
        return Err(AppError::Validation(
            "Keyword metrics cannot be negative".to_string(),
        ));
    }

    let item = state
        .store
        .insert_keyword_metrics(
            request.user_id,
            NewKeywordMetrics {
                keyword,
                search_volume: request.search_volume,
                difficulty: request.difficulty,
                cpc: request.cpc,
                competition: request.competition,
            },
        )
        .await?;
    success(KeywordMetricsItem { item })
}
