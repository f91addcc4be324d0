use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{send_json, DataSourceError};

const WEBMASTERS_BASE: &str = "https://www.googleapis.com/webmasters/v3/sites";
const ROW_LIMIT: u32 = 100;

/// Search performance of one query over the requested window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRow {
    pub keyword: String,
    pub position: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
}

#[derive(Debug, Deserialize)]
struct AnalyticsResponse {
    #[serde(default)]
    rows: Vec<AnalyticsRow>,
}

#[derive(Debug, Deserialize)]
struct AnalyticsRow {
    #[serde(default)]
    keys: Vec<String>,
    #[serde(default)]
    clicks: f64,
    #[serde(default)]
    impressions: f64,
    #[serde(default)]
    ctr: f64,
    #[serde(default)]
    position: f64,
}

/// The site URL is a single path segment and must be percent-encoded.
fn query_url(site_url: &str) -> Result<Url, DataSourceError> {
    let bad_base = || DataSourceError::NotConfigured("Search Console base URL");
    let mut url = Url::parse(WEBMASTERS_BASE).map_err(|_| bad_base())?;
    url.path_segments_mut()
        .map_err(|_| bad_base())?
        .push(site_url)
        .push("searchAnalytics")
        .push("query");
    Ok(url)
}

pub(super) async fn query(
    client: &Client,
    access_token: &str,
    site_url: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<QueryRow>, DataSourceError> {
    let response: AnalyticsResponse = send_json(
        client
            .post(query_url(site_url)?)
            .bearer_auth(access_token)
            .json(&json!({
                "startDate": start.format("%Y-%m-%d").to_string(),
                "endDate": end.format("%Y-%m-%d").to_string(),
                "dimensions": ["query"],
                "rowLimit": ROW_LIMIT,
            })),
    )
    .await?;
    Ok(into_rows(response))
}

fn into_rows(response: AnalyticsResponse) -> Vec<QueryRow> {
    response
        .rows
        .into_iter()
        .filter_map(|row| {
            let keyword = row.keys.into_iter().next()?;
            Some(QueryRow {
                keyword,
                position: row.position,
                clicks: row.clicks,
                impressions: row.impressions,
                ctr: row.ctr,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url_encodes_site() {
        let url = query_url("https://www.example.com/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/webmasters/v3/sites/https:%2F%2Fwww.example.com%2F/searchAnalytics/query"
        );
    }

    #[test]
    fn test_into_rows_uses_first_key_and_skips_keyless() {
        let json = r#"{
            "rows": [
                {"keys": ["rust seo"], "clicks": 4, "impressions": 100, "ctr": 0.04, "position": 7.5},
                {"keys": [], "clicks": 1, "impressions": 2, "ctr": 0.5, "position": 1}
            ]
        }"#;
        let rows = into_rows(serde_json::from_str(json).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].keyword, "rust seo");
        assert_eq!(rows[0].position, 7.5);
        assert_eq!(rows[0].impressions, 100.0);
    }

    #[test]
    fn test_into_rows_without_rows_is_empty() {
        assert!(into_rows(serde_json::from_str("{}").unwrap()).is_empty());
    }
}
