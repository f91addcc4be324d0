use reqwest::Client;
use serde_json::{json, Value};

use super::{send_json, DataSourceError};

const MOZ_LINKS_URL: &str = "https://lsapi.seomoz.com/v2/links";
const LINK_LIMIT: u32 = 50;

pub(super) async fn links(
    client: &Client,
    api_key: &str,
    domain: &str,
) -> Result<Value, DataSourceError> {
    send_json(client.post(MOZ_LINKS_URL).bearer_auth(api_key).json(&json!({
        "target": domain,
        "target_scope": "root_domain",
        "limit": LINK_LIMIT,
    })))
    .await
}

/// A single inbound link pulled out of a Moz links payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLink {
    pub source_url: String,
    pub target_url: String,
    pub anchor_text: Option<String>,
    pub domain_authority: Option<f64>,
    pub page_authority: Option<f64>,
    pub follow: bool,
}

/// Best-effort extraction: entries without a source page are skipped, a
/// missing target page falls back to the audited domain.
pub fn extract_links(payload: &Value, domain: &str) -> Vec<ExtractedLink> {
    let Some(results) = payload.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|entry| {
            let source = entry.get("source")?;
            let source_url = source.get("page")?.as_str()?.to_string();
            let target_url = entry
                .pointer("/target/page")
                .and_then(Value::as_str)
                .unwrap_or(domain)
                .to_string();
            Some(ExtractedLink {
                source_url,
                target_url,
                anchor_text: entry
                    .get("anchor_text")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                domain_authority: source.get("domain_authority").and_then(Value::as_f64),
                page_authority: source.get("page_authority").and_then(Value::as_f64),
                follow: !entry
                    .get("nofollow")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        })
        .collect()
}
