mod audits;
mod chat;
mod config;
mod content;
mod dashboard;
mod data_sources;
mod db;
mod errors;
mod keywords;
mod llm_client;
mod models;
mod response;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::data_sources::HttpSeoData;
use crate::db::create_pool;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SEOGenius API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize SEO data providers
    let data = HttpSeoData::new(&config)?;
    for (name, configured) in [
        ("SerpAPI", config.serp_api_key.is_some()),
        ("Moz", config.moz_api_key.is_some()),
        ("PageSpeed Insights", config.google_api_key.is_some()),
        (
            "Business Profile",
            config.gmb_access_token.is_some() && config.gmb_account_id.is_some(),
        ),
        (
            "Search Console",
            config.search_console_access_token.is_some() && config.site_url.is_some(),
        ),
        (
            "Twitter",
            config.twitter_bearer_token.is_some() && config.twitter_handle.is_some(),
        ),
        (
            "LinkedIn",
            config.linkedin_access_token.is_some() && config.linkedin_author_urn.is_some(),
        ),
    ] {
        if !configured {
            warn!("{name} is not configured; dependent endpoints will degrade or fail");
        }
    }

    let state = AppState {
        llm: Arc::new(llm),
        data: Arc::new(data),
        store: Arc::new(PgStore::new(db)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
