use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{send_json, DataSourceError};

const PAGESPEED_URL: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// The slice of a Lighthouse report the audit prompt needs.
/// The full report is several hundred kilobytes; only these numbers are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSpeedSummary {
    /// Lighthouse performance category, 0–100.
    pub performance_score: Option<f64>,
    pub largest_contentful_paint_ms: Option<f64>,
    /// Lab proxy for first input delay.
    pub total_blocking_time_ms: Option<f64>,
    pub cumulative_layout_shift: Option<f64>,
    pub first_contentful_paint_ms: Option<f64>,
}

pub(super) async fn run(
    client: &Client,
    api_key: &str,
    url: &str,
) -> Result<PageSpeedSummary, DataSourceError> {
    let report: Value = send_json(client.get(PAGESPEED_URL).query(&[
        ("url", url),
        ("key", api_key),
        ("category", "performance"),
    ]))
    .await?;
    Ok(summarize(&report))
}

fn audit_value(report: &Value, audit: &str) -> Option<f64> {
    report
        .pointer(&format!("/lighthouseResult/audits/{audit}/numericValue"))
        .and_then(Value::as_f64)
}

pub fn summarize(report: &Value) -> PageSpeedSummary {
    PageSpeedSummary {
        performance_score: report
            .pointer("/lighthouseResult/categories/performance/score")
            .and_then(Value::as_f64)
            .map(|s| (s * 100.0).round()),
        largest_contentful_paint_ms: audit_value(report, "largest-contentful-paint"),
        total_blocking_time_ms: audit_value(report, "total-blocking-time"),
        cumulative_layout_shift: audit_value(report, "cumulative-layout-shift"),
        first_contentful_paint_ms: audit_value(report, "first-contentful-paint"),
    }
}
