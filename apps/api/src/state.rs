use std::sync::Arc;

use crate::data_sources::SeoDataSource;
use crate::llm_client::TextGenerator;
use crate::store::SeoStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini in production.
    pub llm: Arc<dyn TextGenerator>,
    pub data: Arc<dyn SeoDataSource>,
    pub store: Arc<dyn SeoStore>,
}
