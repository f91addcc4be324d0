//! Local SEO report: review sentiment, local keywords and recommendations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::audits::prompts::{LOCAL_PROMPT_TEMPLATE, NO_LISTING_DATA};
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::{call_json, TextGenerator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sentiment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetrics {
    #[serde(default)]
    pub total_reviews: f64,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub positive_sentiment_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GmbData {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub metrics: ReviewMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalSeoAnalysis {
    #[serde(default)]
    pub gmb_data: GmbData,
    #[serde(default)]
    pub local_keywords: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl LocalSeoAnalysis {
    /// Recomputes review metrics from the reviews when the model returned any,
    /// so the totals always agree with the list.
    pub fn reconciled(mut self) -> Self {
        let reviews = &self.gmb_data.reviews;
        if reviews.is_empty() {
            return self;
        }
        let total = reviews.len() as f64;
        let positive = reviews
            .iter()
            .filter(|r| r.sentiment.eq_ignore_ascii_case("positive"))
            .count() as f64;
        self.gmb_data.metrics = ReviewMetrics {
            total_reviews: total,
            average_rating: reviews.iter().map(|r| r.rating).sum::<f64>() / total,
            positive_sentiment_percentage: positive / total * 100.0,
        };
        self
    }
}

pub async fn analyze_local_presence(
    llm: &dyn TextGenerator,
    business_name: &str,
    listing: Option<&Value>,
) -> Result<LocalSeoAnalysis, AppError> {
    let listing = listing
        .map(Value::to_string)
        .unwrap_or_else(|| NO_LISTING_DATA.to_string());
    let prompt = render(
        LOCAL_PROMPT_TEMPLATE,
        &[("business", business_name), ("listing", &listing)],
    );
    let analysis: LocalSeoAnalysis = call_json(llm, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Local SEO analysis failed: {e}")))?;
    Ok(analysis.reconciled())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: f64, sentiment: &str) -> Review {
        Review {
            rating,
            text: String::new(),
            sentiment: sentiment.to_string(),
        }
    }

    #[test]
    fn test_reconciled_recomputes_metrics() {
        let analysis = LocalSeoAnalysis {
            gmb_data: GmbData {
                reviews: vec![
                    review(5.0, "Positive"),
                    review(4.0, "positive"),
                    review(1.0, "negative"),
                    review(2.0, "neutral"),
                ],
                metrics: ReviewMetrics {
                    total_reviews: 99.0,
                    ..ReviewMetrics::default()
                },
            },
            ..LocalSeoAnalysis::default()
        }
        .reconciled();
        let metrics = &analysis.gmb_data.metrics;
        assert_eq!(metrics.total_reviews, 4.0);
        assert_eq!(metrics.average_rating, 3.0);
        assert_eq!(metrics.positive_sentiment_percentage, 50.0);
    }

    #[test]
    fn test_reconciled_keeps_metrics_without_reviews() {
        let analysis = LocalSeoAnalysis {
            gmb_data: GmbData {
                reviews: vec![],
                metrics: ReviewMetrics {
                    total_reviews: 12.0,
                    average_rating: 4.2,
                    positive_sentiment_percentage: 80.0,
                },
            },
            ..LocalSeoAnalysis::default()
        }
        .reconciled();
        assert_eq!(analysis.gmb_data.metrics.total_reviews, 12.0);
    }
}
