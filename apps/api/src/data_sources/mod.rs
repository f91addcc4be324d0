//! External SEO data providers.
//!
//! Handlers see a single `SeoDataSource`; `HttpSeoData` fans out to SerpAPI,
//! Moz, PageSpeed Insights, Google Business Profile, Search Console, and the
//! Twitter and LinkedIn post APIs.
//! Providers whose credentials are missing either report `NotConfigured`
//! or return `None`, depending on whether the endpoint can work without them.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::config::Config;

pub mod business_profile;
pub mod moz;
pub mod pagespeed;
pub mod search_console;
pub mod serp_api;
pub mod social;

pub use pagespeed::PageSpeedSummary;
pub use search_console::QueryRow;
pub use serp_api::SerpResult;
pub use social::{Platform, SocialPost};

/// Pages larger than this are truncated before parsing.
pub const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} not configured")]
    NotConfigured(&'static str),
}

#[async_trait]
pub trait SeoDataSource: Send + Sync {
    /// Top organic results for a keyword, 1-based positions.
    async fn organic_results(&self, keyword: &str) -> Result<Vec<SerpResult>, DataSourceError>;

    /// Raw inbound link data for a domain.
    async fn backlinks(&self, domain: &str) -> Result<Value, DataSourceError>;

    /// HTML body of a page, truncated to `MAX_PAGE_BYTES`.
    async fn fetch_page(&self, url: &str) -> Result<String, DataSourceError>;

    /// Lab performance data; `None` when no Google API key is configured.
    async fn page_speed(&self, url: &str) -> Result<Option<PageSpeedSummary>, DataSourceError>;

    /// Business listings for the configured account; `None` when unconfigured.
    async fn business_locations(&self) -> Result<Option<Value>, DataSourceError>;

    /// Per-query search performance for the configured site.
    async fn search_analytics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<QueryRow>, DataSourceError>;

    /// Recent posts of the configured account on one platform.
    async fn social_posts(&self, platform: Platform) -> Result<Vec<SocialPost>, DataSourceError>;
}

/// Production data source backed by `reqwest`.
#[derive(Clone)]
pub struct HttpSeoData {
    client: Client,
    serp_api_key: Option<String>,
    moz_api_key: Option<String>,
    google_api_key: Option<String>,
    gmb_access_token: Option<String>,
    gmb_account_id: Option<String>,
    search_console_access_token: Option<String>,
    site_url: Option<String>,
    twitter_bearer_token: Option<String>,
    twitter_handle: Option<String>,
    linkedin_access_token: Option<String>,
    linkedin_author_urn: Option<String>,
}

impl HttpSeoData {
    pub fn new(config: &Config) -> Result<Self, DataSourceError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .user_agent(concat!("seogenius/", env!("CARGO_PKG_VERSION")))
                .build()?,
            serp_api_key: config.serp_api_key.clone(),
            moz_api_key: config.moz_api_key.clone(),
            google_api_key: config.google_api_key.clone(),
            gmb_access_token: config.gmb_access_token.clone(),
            gmb_account_id: config.gmb_account_id.clone(),
            search_console_access_token: config.search_console_access_token.clone(),
            site_url: config.site_url.clone(),
            twitter_bearer_token: config.twitter_bearer_token.clone(),
            twitter_handle: config.twitter_handle.clone(),
            linkedin_access_token: config.linkedin_access_token.clone(),
            linkedin_author_urn: config.linkedin_author_urn.clone(),
        })
    }
}

/// Sends a request and decodes a JSON body, turning non-2xx into `Api` errors.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, DataSourceError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        warn!("Data provider returned {status}");
        return Err(DataSourceError::Api {
            status: status.as_u16(),
            message,
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Appends at most `cap - buf.len()` bytes of `chunk`.
/// Returns `true` when part of the chunk had to be dropped.
fn append_capped(buf: &mut Vec<u8>, chunk: &[u8], cap: usize) -> bool {
    let room = cap.saturating_sub(buf.len());
    let take = chunk.len().min(room);
    buf.extend_from_slice(&chunk[..take]);
    take < chunk.len()
}

#[async_trait]
impl SeoDataSource for HttpSeoData {
    async fn organic_results(&self, keyword: &str) -> Result<Vec<SerpResult>, DataSourceError> {
        let api_key = self
            .serp_api_key
            .as_deref()
            .ok_or(DataSourceError::NotConfigured("SERP API key"))?;
        serp_api::organic_results(&self.client, api_key, keyword).await
    }

    async fn backlinks(&self, domain: &str) -> Result<Value, DataSourceError> {
        let api_key = self
            .moz_api_key
            .as_deref()
            .ok_or(DataSourceError::NotConfigured("Moz API key"))?;
        moz::links(&self.client, api_key, domain).await
    }

    async fn fetch_page(&self, url: &str) -> Result<String, DataSourceError> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::Api {
                status: status.as_u16(),
                message: format!("fetching {url} failed"),
            });
        }
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if append_capped(&mut body, &chunk, MAX_PAGE_BYTES) {
                warn!("Page {url} is larger than {MAX_PAGE_BYTES} bytes, truncated");
                break;
            }
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn page_speed(&self, url: &str) -> Result<Option<PageSpeedSummary>, DataSourceError> {
        let Some(api_key) = self.google_api_key.as_deref() else {
            return Ok(None);
        };
        pagespeed::run(&self.client, api_key, url).await.map(Some)
    }

    async fn business_locations(&self) -> Result<Option<Value>, DataSourceError> {
        let (Some(token), Some(account)) = (
            self.gmb_access_token.as_deref(),
            self.gmb_account_id.as_deref(),
        ) else {
            return Ok(None);
        };
        business_profile::locations(&self.client, token, account)
            .await
            .map(Some)
    }

    async fn search_analytics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<QueryRow>, DataSourceError> {
        let token = self
            .search_console_access_token
            .as_deref()
            .ok_or(DataSourceError::NotConfigured("Search Console access token"))?;
        let site_url = self
            .site_url
            .as_deref()
            .ok_or(DataSourceError::NotConfigured("Site URL"))?;
        search_console::query(&self.client, token, site_url, start, end).await
    }

    async fn social_posts(&self, platform: Platform) -> Result<Vec<SocialPost>, DataSourceError> {
        match platform {
            Platform::Twitter => {
                let token = self
                    .twitter_bearer_token
                    .as_deref()
                    .ok_or(DataSourceError::NotConfigured("Twitter bearer token"))?;
                let handle = self
                    .twitter_handle
                    .as_deref()
                    .ok_or(DataSourceError::NotConfigured("Twitter handle"))?;
                social::twitter_posts(&self.client, token, handle).await
            }
            Platform::Linkedin => {
                let token = self
                    .linkedin_access_token
                    .as_deref()
                    .ok_or(DataSourceError::NotConfigured("LinkedIn access token"))?;
                let author = self
                    .linkedin_author_urn
                    .as_deref()
                    .ok_or(DataSourceError::NotConfigured("LinkedIn author URN"))?;
                social::linkedin_posts(&self.client, token, author).await
            }
        }
    }
}
