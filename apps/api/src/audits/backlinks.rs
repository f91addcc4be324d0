//! Backlink audit: toxic links, outreach opportunities and link metrics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::audits::prompts::BACKLINK_PROMPT_TEMPLATE;
use crate::data_sources::moz::ExtractedLink;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::{call_json, TextGenerator};
use crate::models::backlink::NewBacklink;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToxicLink {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkOpportunity {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub strategy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacklinkMetrics {
    #[serde(default)]
    pub total_backlinks: f64,
    #[serde(default)]
    pub toxic_percentage: f64,
    #[serde(default)]
    pub domain_authority: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacklinkAnalysis {
    #[serde(default)]
    pub toxic_links: Vec<ToxicLink>,
    #[serde(default)]
    pub opportunities: Vec<LinkOpportunity>,
    #[serde(default)]
    pub metrics: BacklinkMetrics,
}

pub async fn analyze_backlinks(
    llm: &dyn TextGenerator,
    domain: &str,
    backlinks: &Value,
) -> Result<BacklinkAnalysis, AppError> {
    let prompt = render(
        BACKLINK_PROMPT_TEMPLATE,
        &[("domain", domain), ("backlinks", &backlinks.to_string())],
    );
    call_json(llm, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Backlink analysis failed: {e}")))
}

/// Turns provider links into records, marking the ones the model flagged.
pub fn link_records(links: Vec<ExtractedLink>, analysis: &BacklinkAnalysis) -> Vec<NewBacklink> {
    links
        .into_iter()
        .map(|link| {
            let toxic = analysis
                .toxic_links
                .iter()
                .any(|t| same_url(&t.url, &link.source_url));
            NewBacklink {
                status: Some(if toxic { "toxic" } else { "active" }.to_string()),
                source_url: link.source_url,
                target_url: link.target_url,
                anchor_text: link.anchor_text,
                domain_authority: link.domain_authority,
                page_authority: link.page_authority,
                follow: link.follow,
            }
        })
        .collect()
}

/// Compares URLs ignoring scheme, `www.`, case and a trailing slash.
fn same_url(a: &str, b: &str) -> bool {
    fn canonical(url: &str) -> String {
        let url = url.trim().to_lowercase();
        let url = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(&url);
        let url = url.strip_prefix("www.").unwrap_or(url);
        url.trim_end_matches('/').to_string()
    }
    !a.trim().is_empty() && canonical(a) == canonical(b)
}
