//! Technical SEO audit: on-page checks, lab performance and model findings.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::audits::prompts::TECHNICAL_PROMPT_TEMPLATE;
use crate::data_sources::PageSpeedSummary;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::{call_json, TextGenerator};

/// Upper bound on page characters sent to the model.
pub const MAX_PAGE_CHARS: usize = 20_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrokenLink {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaIssue {
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub missing_tags: Vec<String>,
}

/// `lcp` in seconds, `fid` in milliseconds, `cls` unitless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    #[serde(default)]
    pub lcp: f64,
    #[serde(default)]
    pub fid: f64,
    #[serde(default)]
    pub cls: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(default)]
    pub page_speed: f64,
    #[serde(default)]
    pub core_web_vitals: CoreWebVitals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAudit {
    #[serde(default)]
    pub broken_links: Vec<BrokenLink>,
    #[serde(default)]
    pub meta_issues: Vec<MetaIssue>,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl TechnicalAudit {
    /// Adds locally detected missing tags to the issue entry for `url`.
    pub fn merge_meta_issues(&mut self, url: &str, missing: &[String]) {
        if missing.is_empty() {
            return;
        }
        let key = url.trim_end_matches('/');
        let index = match self
            .meta_issues
            .iter()
            .position(|issue| issue.page.trim_end_matches('/') == key)
        {
            Some(index) => index,
            None => {
                self.meta_issues.push(MetaIssue {
                    page: url.to_string(),
                    missing_tags: Vec::new(),
                });
                self.meta_issues.len() - 1
            }
        };
        let issue = &mut self.meta_issues[index];
        for tag in missing {
            if !issue
                .missing_tags
                .iter()
                .any(|t| t.eq_ignore_ascii_case(tag))
            {
                issue.missing_tags.push(tag.clone());
            }
        }
    }

    /// Measured lab data replaces the model's estimates.
    pub fn apply_page_speed(&mut self, summary: &PageSpeedSummary) {
        let perf = &mut self.performance;
        if let Some(score) = summary.performance_score {
            perf.page_speed = score;
        }
        if let Some(lcp) = summary.largest_contentful_paint_ms {
            perf.core_web_vitals.lcp = lcp / 1000.0;
        }
        if let Some(tbt) = summary.total_blocking_time_ms {
            perf.core_web_vitals.fid = tbt;
        }
        if let Some(cls) = summary.cumulative_layout_shift {
            perf.core_web_vitals.cls = cls;
        }
    }
}

/// Head and structure tags every indexable page should carry.
/// Each check is `(tag name, CSS selector, needs non-empty text)`.
const REQUIRED_TAGS: &[(&str, &str, bool)] = &[
    ("title", "head title", true),
    ("meta description", r#"meta[name="description"][content]"#, false),
    ("viewport", r#"meta[name="viewport"]"#, false),
    ("canonical", r#"link[rel="canonical"][href]"#, false),
    ("lang", "html[lang]", false),
    ("og:title", r#"meta[property="og:title"][content]"#, false),
    ("h1", "h1", true),
];

/// Names of the required tags absent from the page.
pub fn missing_meta_tags(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    REQUIRED_TAGS
        .iter()
        .filter(|(_, selector, needs_text)| {
            let Ok(selector) = Selector::parse(selector) else {
                return false;
            };
            !document.select(&selector).any(|element| {
                if *needs_text {
                    !element.text().collect::<String>().trim().is_empty()
                } else {
                    element
                        .value()
                        .attr("content")
                        .map_or(true, |content| !content.trim().is_empty())
                }
            })
        })
        .map(|(name, _, _)| name.to_string())
        .collect()
}

/// Truncates on a character boundary.
pub fn truncate_page(html: &str) -> &str {
    match html.char_indices().nth(MAX_PAGE_CHARS) {
        Some((index, _)) => &html[..index],
        None => html,
    }
}

pub async fn run_audit(
    llm: &dyn TextGenerator,
    url: &str,
    page: &str,
    page_speed: Option<&PageSpeedSummary>,
) -> Result<TechnicalAudit, AppError> {
    let missing = missing_meta_tags(page);
    let lighthouse = match page_speed {
        Some(summary) => serde_json::to_string(summary).map_err(|e| AppError::Internal(e.into()))?,
        None => "unavailable".to_string(),
    };
    let missing_list = if missing.is_empty() {
        "none".to_string()
    } else {
        missing.join(", ")
    };
    let prompt = render(
        TECHNICAL_PROMPT_TEMPLATE,
        &[
            ("url", url),
            ("missing_tags", &missing_list),
            ("lighthouse", &lighthouse),
            ("page", truncate_page(page)),
        ],
    );

    let mut audit: TechnicalAudit = call_json(llm, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Technical audit failed: {e}")))?;

    audit.merge_meta_issues(url, &missing);
    if let Some(summary) = page_speed {
        audit.apply_page_speed(summary);
    }
    Ok(audit)
}
