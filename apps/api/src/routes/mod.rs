pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::audits::handlers as audits;
use crate::chat::handlers as chat;
use crate::content::handlers as content;
use crate::dashboard::handlers as dashboard;
use crate::keywords::handlers as keywords;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content
        .route(
            "/api/v1/generate-content",
            post(content::handle_generate_content),
        )
        .route(
            "/api/v1/translate-content",
            post(content::handle_translate_content),
        )
        .route(
            "/api/v1/content",
            get(content::handle_list_content).post(content::handle_create_content),
        )
        .route("/api/v1/content/:id", patch(content::handle_update_content))
        // Keywords
        .route(
            "/api/v1/analyze-keywords",
            post(keywords::handle_analyze_keywords),
        )
        .route(
            "/api/v1/keyword-metrics",
            get(keywords::handle_list_keyword_metrics).post(keywords::handle_create_keyword_metrics),
        )
        // Audits
        .route("/api/v1/analyze-serp", post(audits::handle_analyze_serp))
        .route(
            "/api/v1/analyze-backlinks",
            post(audits::handle_analyze_backlinks),
        )
        .route(
            "/api/v1/technical-seo-audit",
            post(audits::handle_technical_audit),
        )
        .route("/api/v1/local-seo-analysis", post(audits::handle_local_seo))
        .route(
            "/api/v1/analyze-social-media",
            post(audits::handle_analyze_social),
        )
        .route("/api/v1/track-rankings", post(audits::handle_track_rankings))
        .route("/api/v1/backlinks", get(audits::handle_list_backlinks))
        .route("/api/v1/rankings", get(audits::handle_list_rankings))
        // Chat
        .route("/api/v1/chat-assistant", post(chat::handle_chat))
        .route("/api/v1/chat/history", get(chat::handle_chat_history))
        // Dashboard
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .with_state(state)
}
