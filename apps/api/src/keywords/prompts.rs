// Keyword LLM prompt templates.

pub const CLUSTER_PROMPT_TEMPLATE: &str = r#"Analyze the following keywords and categorize them by search intent:
{keywords}

Group them into these categories:
1. Informational (users seeking information)
2. Navigational (users looking for specific websites/brands)
3. Transactional (users intending to make a purchase)

Every keyword must appear in exactly one category, spelled exactly as given.

Respond in JSON format like this:
{
  "informational": ["keyword1", "keyword2"],
  "navigational": ["keyword3"],
  "transactional": ["keyword4", "keyword5"]
}"#;
