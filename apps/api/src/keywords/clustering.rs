//! Search-intent clustering of a keyword list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::keywords::prompts::CLUSTER_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::{call_json, TextGenerator};

/// Three-way intent grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentClusters {
    #[serde(default)]
    pub informational: Vec<String>,
    #[serde(default)]
    pub navigational: Vec<String>,
    #[serde(default)]
    pub transactional: Vec<String>,
}

impl IntentClusters {
    /// Trims entries and removes blanks and duplicates. A keyword keeps the
    /// first category it appears in, in field order.
    pub fn normalized(self) -> Self {
        let mut seen = HashSet::new();
        let mut keep = |list: Vec<String>| -> Vec<String> {
            list.into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
                .collect()
        };
        IntentClusters {
            informational: keep(self.informational),
            navigational: keep(self.navigational),
            transactional: keep(self.transactional),
        }
    }
}

pub async fn cluster_keywords(
    llm: &dyn TextGenerator,
    keywords: &[String],
) -> Result<IntentClusters, AppError> {
    let prompt = render(CLUSTER_PROMPT_TEMPLATE, &[("keywords", &keywords.join(", "))]);
    let clusters: IntentClusters = call_json(llm, &prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Keyword clustering failed: {e}")))?;
    Ok(clusters.normalized())
}
