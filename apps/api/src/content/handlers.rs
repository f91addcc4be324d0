//! Axum route handlers for the Content API.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::content::generator::{extract_title, generate_article, ContentBrief};
use crate::content::translator::{translate, SeoMetadata};
use crate::errors::AppError;
use crate::models::content::{
    ContentRow, ContentUpdate, NewContent, DEFAULT_LANGUAGE, STATUS_DRAFT,
};
use crate::response::{
    present, present_list, success, ApiJson, ApiPath, ApiQuery, ApiResult, Items, UserScope,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    pub topic: Option<String>,
    #[serde(alias = "targetAudience")]
    pub target_audience: Option<String>,
    pub keywords: Option<Vec<String>>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub content: Option<String>,
    #[serde(alias = "targetLanguage")]
    pub target_language: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_content: String,
    pub seo_metadata: SeoMetadata,
    pub content_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub update: ContentUpdate,
}

#[derive(Debug, Serialize)]
pub struct ContentItem {
    pub item: ContentRow,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate-content
///
/// Writes an SEO article for a topic. When a user is given, the article is
/// also saved as a draft content record.
pub async fn handle_generate_content(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateContentRequest>,
) -> ApiResult<GenerateContentResponse> {
    let (Some(topic), Some(audience), Some(keywords)) = (
        present(request.topic.as_deref()),
        present(request.target_audience.as_deref()),
        present_list(request.keywords.as_deref()),
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let brief = ContentBrief {
        topic,
        audience,
        keywords: &keywords,
    };
    let content = generate_article(state.llm.as_ref(), &brief).await?;

    let content_id = match request.user_id {
        Some(user_id) => {
            let row = state
                .store
                .insert_content(NewContent {
                    user_id,
                    title: extract_title(&content).unwrap_or_else(|| topic.to_string()),
                    content: content.clone(),
                    keywords,
                    language: DEFAULT_LANGUAGE.to_string(),
                    status: STATUS_DRAFT.to_string(),
                    meta_description: None,
                    url: None,
                    page_type: None,
                    target_audience: Some(audience.to_string()),
                })
                .await?;
            info!("Saved generated draft {} for user {}", row.id, user_id);
            Some(row.id)
        }
        None => None,
    };

    success(GenerateContentResponse {
        content,
        content_id,
    })
}

/// POST /api/v1/translate-content
///
/// Translates content with SEO localization and saves the translation as a
/// content record.
pub async fn handle_translate_content(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TranslateRequest>,
) -> ApiResult<TranslateResponse> {
    let (Some(content), Some(language), Some(user_id)) = (
        present(request.content.as_deref()),
        present(request.target_language.as_deref()),
        request.user_id,
    ) else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let translation = translate(state.llm.as_ref(), content, language).await?;

    let meta_description = Some(translation.metadata.meta_description.clone())
        .filter(|m| !m.trim().is_empty());
    let row = state
        .store
        .insert_content(NewContent {
            user_id,
            title: format!("Translation to {language}"),
            content: translation.content.clone(),
            keywords: translation.metadata.local_keywords.clone(),
            language: language.to_string(),
            status: STATUS_DRAFT.to_string(),
            meta_description,
            url: Some("translation".to_string()),
            page_type: None,
            target_audience: None,
        })
        .await?;

    success(TranslateResponse {
        translated_content: translation.content,
        seo_metadata: translation.metadata,
        content_id: row.id,
    })
}

/// GET /api/v1/content?user_id=
pub async fn handle_list_content(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<UserScope>,
) -> ApiResult<Items<ContentRow>> {
    let items = state.store.list_content(scope.user_id).await?;
    success(Items { items })
}

/// POST /api/v1/content
pub async fn handle_create_content(
    State(state): State<AppState>,
    ApiJson(new): ApiJson<NewContent>,
) -> ApiResult<ContentItem> {
    if new.title.trim().is_empty() || new.content.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields".to_string()));
    }
    let item = state.store.insert_content(new).await?;
    success(ContentItem { item })
}

/// PATCH /api/v1/content/:id
///
/// Applies a partial update. Records owned by another user are reported as not found.
pub async fn handle_update_content(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateContentRequest>,
) -> ApiResult<ContentItem> {
    if request.update.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }
    if request.update.blanks_required_field() {
        return Err(AppError::Validation(
            "Title and content cannot be blank".to_string(),
        ));
    }
    let item = state
        .store
        .update_content(request.user_id, id, request.update)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Content {id} not found")))?;
    success(ContentItem { item })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::{MemoryStore, StubData, StubLlm, TestApp};

    const ARTICLE: &str = "# Rust for SEO\n\nIntro paragraph.";

    #[tokio::test]
    async fn test_generate_content_returns_markdown() {
        let app = TestApp::with_reply(ARTICLE);
        let (status, body) = app
            .post(
                "/api/v1/generate-content",
                json!({"topic": "Rust", "targetAudience": "devs", "keywords": ["rust", "seo"]}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["content"], ARTICLE);
        assert!(body.get("content_id").is_none());
        assert!(app.store.tables.lock().unwrap().content.is_empty());
        assert!(app.llm.prompts.lock().unwrap()[0].contains("rust, seo"));
    }

    #[tokio::test]
    async fn test_generate_content_saves_draft_for_user() {
        let app = TestApp::with_reply(ARTICLE);
        let user_id = uuid::Uuid::new_v4();
        let (status, body) = app
            .post(
                "/api/v1/generate-content",
                json!({
                    "topic": "Rust",
                    "target_audience": "devs",
                    "keywords": ["rust"],
                    "user_id": user_id
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["content_id"].is_string());
        let tables = app.store.tables.lock().unwrap();
        assert_eq!(tables.content.len(), 1);
        assert_eq!(tables.content[0].title, "Rust for SEO");
        assert_eq!(tables.content[0].status, "draft");
        assert_eq!(tables.content[0].target_audience.as_deref(), Some("devs"));
    }

    #[tokio::test]
    async fn test_generate_content_missing_fields_is_400() {
        let app = TestApp::with_reply(ARTICLE);
        for body in [
            json!({"targetAudience": "devs", "keywords": ["rust"]}),
            json!({"topic": "Rust", "keywords": ["rust"]}),
            json!({"topic": "Rust", "targetAudience": "devs"}),
            json!({"topic": "Rust", "targetAudience": "devs", "keywords": [" "]}),
        ] {
            let (status, response) = app.post("/api/v1/generate-content", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["error"], "Missing required fields");
            assert_eq!(response["status"], "error");
        }
        assert!(app.llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_400_envelope() {
        let app = TestApp::with_reply(ARTICLE);
        let (status, body) = app.post_raw("/api/v1/generate-content", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_generate_content_llm_failure_is_500_and_saves_nothing() {
        let app = TestApp::new(
            StubLlm::failing(),
            StubData::default(),
            MemoryStore::default(),
        );
        let (status, body) = app
            .post(
                "/api/v1/generate-content",
                json!({
                    "topic": "Rust",
                    "targetAudience": "devs",
                    "keywords": ["rust"],
                    "user_id": uuid::Uuid::new_v4()
                }),
            )
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert!(app.store.tables.lock().unwrap().content.is_empty());
    }

    #[tokio::test]
    async fn test_translate_content_shape_and_record() {
        let reply = "---CONTENT---\nHola\n---METADATA---\n{\"local_keywords\": [\"hola\"], \"meta_description\": \"Saludo\", \"title_tag\": \"Hola\", \"hreflang_tag\": \"es\"}";
        let app = TestApp::with_reply(reply);
        let user_id = uuid::Uuid::new_v4();
        let (status, body) = app
            .post(
                "/api/v1/translate-content",
                json!({"content": "Hello", "targetLanguage": "Spanish", "userId": user_id}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translatedContent"], "Hola");
        assert_eq!(body["seoMetadata"]["hreflang_tag"], "es");
        assert_eq!(body["status"], "success");

        let tables = app.store.tables.lock().unwrap();
        let row = &tables.content[0];
        assert_eq!(row.title, "Translation to Spanish");
        assert_eq!(row.url.as_deref(), Some("translation"));
        assert_eq!(row.meta_description.as_deref(), Some("Saludo"));
        assert_eq!(row.language, "Spanish");
    }

    #[tokio::test]
    async fn test_translate_requires_user() {
        let app = TestApp::with_reply("unused");
        let (status, body) = app
            .post(
                "/api/v1/translate-content",
                json!({"content": "Hello", "targetLanguage": "Spanish"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_translate_without_metadata_is_500() {
        let app = TestApp::with_reply("Hola sin metadatos");
        let (status, _) = app
            .post(
                "/api/v1/translate-content",
                json!({"content": "Hello", "targetLanguage": "es", "userId": uuid::Uuid::new_v4()}),
            )
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(app.store.tables.lock().unwrap().content.is_empty());
    }

    #[tokio::test]
    async fn test_content_create_list_update_scoped_by_user() {
        let app = TestApp::with_reply("unused");
        let owner = uuid::Uuid::new_v4();
        let other = uuid::Uuid::new_v4();

        let (status, created) = app
            .post(
                "/api/v1/content",
                json!({"user_id": owner, "title": "Draft", "content": "Body"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["item"]["status"], "draft");
        assert_eq!(created["item"]["language"], "en");
        let id = created["item"]["id"].as_str().unwrap().to_string();

        let (_, listed) = app.get(&format!("/api/v1/content?user_id={owner}")).await;
        assert_eq!(listed["items"].as_array().unwrap().len(), 1);
        let (_, others) = app.get(&format!("/api/v1/content?user_id={other}")).await;
        assert!(others["items"].as_array().unwrap().is_empty());

        let (status, _) = app
            .patch(
                &format!("/api/v1/content/{id}"),
                json!({"user_id": other, "status": "published"}),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, updated) = app
            .patch(
                &format!("/api/v1/content/{id}"),
                json!({"user_id": owner, "status": "published"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["item"]["status"], "published");
        assert_eq!(updated["item"]["title"], "Draft");
    }

    #[tokio::test]
    async fn test_content_update_rejects_blank_title_or_body() {
        let app = TestApp::with_reply("unused");
        let owner = uuid::Uuid::new_v4();
        let (_, created) = app
            .post(
                "/api/v1/content",
                json!({"user_id": owner, "title": "Draft", "content": "Body"}),
            )
            .await;
        let id = created["item"]["id"].as_str().unwrap().to_string();

        for body in [
            json!({"user_id": owner, "title": "  ", "content": ""}),
            json!({"user_id": owner, "title": "  "}),
            json!({"user_id": owner, "content": ""}),
        ] {
            let (status, response) = app.patch(&format!("/api/v1/content/{id}"), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["status"], "error");
        }

        let tables = app.store.tables.lock().unwrap();
        assert_eq!(tables.content[0].title, "Draft");
        assert_eq!(tables.content[0].content, "Body");
    }

    #[tokio::test]
    async fn test_generate_content_keeps_braces_in_topic_verbatim() {
        let app = TestApp::with_reply(ARTICLE);
        let (status, _) = app
            .post(
                "/api/v1/generate-content",
                json!({"topic": "Guide to {keywords}", "targetAudience": "devs", "keywords": ["secret-kw"]}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let prompts = app.llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("Topic: Guide to {keywords}"));
        assert!(prompts[0].contains("Keywords to include: secret-kw"));
    }

    #[tokio::test]
    async fn test_content_update_without_fields_is_400() {
        let app = TestApp::with_reply("unused");
        let (status, body) = app
            .patch(
                &format!("/api/v1/content/{}", uuid::Uuid::new_v4()),
                json!({"user_id": uuid::Uuid::new_v4()}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No fields to update");
    }

    #[tokio::test]
    async fn test_list_content_requires_user_id() {
        let app = TestApp::with_reply("unused");
        let (status, body) = app.get("/api/v1/content").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }
}
