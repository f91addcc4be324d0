// Content LLM prompt templates.

pub const ARTICLE_PROMPT_TEMPLATE: &str = r#"Create SEO-optimized content for the following:

Topic: {topic}
Target Audience: {audience}
Keywords to include: {keywords}

Please provide content that:
1. Has a compelling title
2. Includes an engaging introduction
3. Contains well-structured body paragraphs
4. Naturally incorporates the provided keywords
5. Ends with a clear conclusion
6. Is optimized for search engines
7. Uses appropriate headings and subheadings
8. Maintains a conversational yet professional tone

Format the response in markdown. Start with the title as a level-one heading."#;

pub const TRANSLATION_SYSTEM: &str = "You are a professional translator and international SEO specialist. \
Follow the requested output format exactly. The metadata section MUST be valid JSON.";

pub const TRANSLATION_PROMPT_TEMPLATE: &str = r#"Translate and optimize the following content for SEO in {language}:

{content}

Requirements:
1. Translate accurately while preserving meaning
2. Adapt cultural nuances and expressions
3. Optimize for SEO in the target language
4. Maintain proper formatting and structure
5. Include relevant local keywords

Provide the response in this format:
---CONTENT---
{translated content}
---METADATA---
{
  "local_keywords": [],
  "meta_description": "",
  "title_tag": "",
  "hreflang_tag": ""
}"#;
