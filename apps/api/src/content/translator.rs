//! SEO translation: localizes content and extracts per-language metadata.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::render;
use crate::llm_client::{parse_json_text, TextGenerator};

use super::prompts::{TRANSLATION_PROMPT_TEMPLATE, TRANSLATION_SYSTEM};

const CONTENT_MARKER: &str = "---CONTENT---";
const METADATA_MARKER: &str = "---METADATA---";

/// Search metadata for the translated page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoMetadata {
    #[serde(default)]
    pub local_keywords: Vec<String>,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub title_tag: String,
    #[serde(default)]
    pub hreflang_tag: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub content: String,
    pub metadata: SeoMetadata,
}

pub async fn translate(
    llm: &dyn TextGenerator,
    content: &str,
    language: &str,
) -> Result<Translation, AppError> {
    let prompt = render(
        TRANSLATION_PROMPT_TEMPLATE,
        &[("language", language), ("content", content)],
    );
    let text = llm
        .generate(&prompt, TRANSLATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Translation failed: {e}")))?;
    parse_translation(&text)
}

/// Splits a `---CONTENT--- … ---METADATA--- {json}` reply.
pub fn parse_translation(text: &str) -> Result<Translation, AppError> {
    let (content_part, metadata_part) = text
        .split_once(METADATA_MARKER)
        .ok_or_else(|| AppError::Llm("Translation reply has no metadata section".to_string()))?;

    let content = content_part.replace(CONTENT_MARKER, "").trim().to_string();
    if content.is_empty() {
        return Err(AppError::Llm("Translation reply has no content".to_string()));
    }

    let metadata = parse_json_text::<SeoMetadata>(metadata_part)
        .map_err(|e| AppError::Llm(format!("Translation metadata unreadable: {e}")))?;

    Ok(Translation { content, metadata })
}
