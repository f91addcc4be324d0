use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::backlink::BacklinkRow;
use crate::models::content::ContentRow;
use crate::models::ranking::RankingRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingPoint {
    pub date: NaiveDate,
    pub keyword: String,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacklinkPoint {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub keyword_rankings: Vec<RankingPoint>,
    pub backlinks: Vec<BacklinkPoint>,
    pub content_count: usize,
    pub tracked_keywords: usize,
    /// `None` until at least one ranking has been tracked.
    pub average_position: Option<f64>,
    pub total_clicks: f64,
}

/// Builds the dashboard from records already in insertion order.
/// Dates are UTC calendar days.
pub fn summarize(
    rankings: &[RankingRow],
    backlinks: &[BacklinkRow],
    content: &[ContentRow],
) -> DashboardSummary {
    let keyword_rankings = rankings
        .iter()
        .map(|r| RankingPoint {
            date: r.created_at.date_naive(),
            keyword: r.keyword.clone(),
            position: r.position,
        })
        .collect();

    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for link in backlinks {
        *per_day.entry(link.created_at.date_naive()).or_default() += 1;
    }

    let tracked_keywords = rankings
        .iter()
        .map(|r| r.keyword.to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    let average_position = (!rankings.is_empty())
        .then(|| rankings.iter().map(|r| r.position).sum::<f64>() / rankings.len() as f64);

    DashboardSummary {
        keyword_rankings,
        backlinks: per_day
            .into_iter()
            .map(|(date, count)| BacklinkPoint { date, count })
            .collect(),
        content_count: content.len(),
        tracked_keywords,
        average_position,
        total_clicks: rankings.iter().map(|r| r.clicks).sum(),
    }
}
