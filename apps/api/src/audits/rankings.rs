//! Rank tracking window and row conversion.

use chrono::{Duration, NaiveDate};

use crate::data_sources::QueryRow;
use crate::models::ranking::NewRanking;

pub const WINDOW_DAYS: i64 = 30;

/// Inclusive `(start, end)` covering the last `WINDOW_DAYS` days.
pub fn tracking_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(WINDOW_DAYS), today)
}

pub fn to_rankings(rows: Vec<QueryRow>) -> Vec<NewRanking> {
    rows.into_iter()
        .map(|row| NewRanking {
            keyword: row.keyword,
            position: row.position,
            clicks: row.clicks,
            impressions: row.impressions,
            ctr: row.ctr,
        })
        .collect()
}
