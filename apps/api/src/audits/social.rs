//! Social-media impact: which posts performed, what they have in common, and
//! how the activity is likely to feed search visibility.

use serde::{Deserialize, Serialize};

use crate::audits::prompts::SOCIAL_PROMPT_TEMPLATE;
use crate::data_sources::SocialPost;
use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::{call_json, TextGenerator};
use crate::response::to_json;

const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopPost {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub engagement_score: f64,
    #[serde(default)]
    pub success_factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentInsights {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub best_posting_times: Vec<String>,
    #[serde(default)]
    pub engagement_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoImpact {
    #[serde(default)]
    pub social_signals: f64,
    #[serde(default)]
    pub brand_visibility: f64,
    #[serde(default)]
    pub traffic_potential: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialAnalysis {
    #[serde(default)]
    pub top_performing_posts: Vec<TopPost>,
    #[serde(default)]
    pub content_insights: ContentInsights,
    #[serde(default)]
    pub seo_impact: SeoImpact,
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}

impl SocialAnalysis {
    /// Keeps only posts that were actually fetched, best first, with every
    /// score on the 0-100 scale.
    pub fn reconciled(mut self, posts: &[SocialPost]) -> Self {
        self.top_performing_posts
            .retain(|top| posts.iter().any(|post| post.url == top.url));
        for top in &mut self.top_performing_posts {
            top.engagement_score = clamp_score(top.engagement_score);
        }
        self.top_performing_posts
            .sort_by(|a, b| b.engagement_score.total_cmp(&a.engagement_score));

        let impact = &mut self.seo_impact;
        impact.social_signals = clamp_score(impact.social_signals);
        impact.brand_visibility = clamp_score(impact.brand_visibility);
        impact.traffic_potential = clamp_score(impact.traffic_potential);
        self
    }
}

/// With no posts there is nothing to read, so the model is not called.
pub async fn analyze_social(
    llm: &dyn TextGenerator,
    posts: &[SocialPost],
) -> Result<SocialAnalysis, AppError> {
    if posts.is_empty() {
        return Ok(SocialAnalysis::default());
    }
    let posts_json = to_json(&posts)?.to_string();
    let prompt = render(SOCIAL_PROMPT_TEMPLATE, &[("posts", &posts_json)]);
    let analysis: SocialAnalysis = call_json(llm, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Social media analysis failed: {e}")))?;
    Ok(analysis.reconciled(posts))
}
