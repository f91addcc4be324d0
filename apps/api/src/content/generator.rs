//! Article generation: turns a topic brief into a markdown article.

use crate::errors::AppError;
use crate::llm_client::prompts::{render, SEO_WRITER_SYSTEM};
use crate::llm_client::TextGenerator;

use super::prompts::ARTICLE_PROMPT_TEMPLATE;

/// What the caller wants written.
#[derive(Debug, Clone)]
pub struct ContentBrief<'a> {
    pub topic: &'a str,
    pub audience: &'a str,
    pub keywords: &'a [String],
}

pub fn build_article_prompt(brief: &ContentBrief<'_>) -> String {
    render(
        ARTICLE_PROMPT_TEMPLATE,
        &[
            ("topic", brief.topic),
            ("audience", brief.audience),
            ("keywords", &brief.keywords.join(", ")),
        ],
    )
}

/// Generates the article body. The model's markdown is returned as-is.
pub async fn generate_article(
    llm: &dyn TextGenerator,
    brief: &ContentBrief<'_>,
) -> Result<String, AppError> {
    let prompt = build_article_prompt(brief);
    let text = llm
        .generate(&prompt, SEO_WRITER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Content generation failed: {e}")))?;
    Ok(text.trim().to_string())
}

/// First markdown heading of any level, without the leading hashes.
pub fn extract_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim().to_string())
        .filter(|title| !title.is_empty())
}
