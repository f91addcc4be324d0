use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{send_json, DataSourceError};

const SERP_API_URL: &str = "https://serpapi.com/search";
const MAX_RESULTS: usize = 10;

/// One organic listing on a results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerpResult {
    pub position: u32,
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

pub(super) async fn organic_results(
    client: &Client,
    api_key: &str,
    keyword: &str,
) -> Result<Vec<SerpResult>, DataSourceError> {
    let response: SearchResponse = send_json(client.get(SERP_API_URL).query(&[
        ("api_key", api_key),
        ("q", keyword),
        ("engine", "google"),
    ]))
    .await?;
    Ok(rank(response))
}

/// Positions are assigned by order in the payload, not by any provider field.
fn rank(response: SearchResponse) -> Vec<SerpResult> {
    response
        .organic_results
        .into_iter()
        .take(MAX_RESULTS)
        .zip(1..)
        .map(|(r, position)| SerpResult {
            position,
            title: r.title,
            description: r.snippet,
            url: r.link,
        })
        .collect()
}
