// Audit LLM prompt templates.

pub const BACKLINK_PROMPT_TEMPLATE: &str = r#"Analyze these backlinks for {domain} and identify:
1. Potentially toxic links based on domain metrics and relevance
2. Link-building opportunities based on competitor analysis
3. Overall domain authority and health metrics

Backlinks data:
{backlinks}

Format response as JSON with:
{
  "toxic_links": [{"url": string, "reason": string}],
  "opportunities": [{"domain": string, "relevance": number, "strategy": string}],
  "metrics": {
    "total_backlinks": number,
    "toxic_percentage": number,
    "domain_authority": number
  }
}"#;

pub const TECHNICAL_PROMPT_TEMPLATE: &str = r#"Perform a technical SEO audit for {url} with this data:

Automated on-page checks (missing tags):
{missing_tags}

Lighthouse Data:
{lighthouse}

Page Content (may be truncated):
{page}

Analyze and provide results in this JSON format:
{
  "broken_links": [{"url": string, "status": number}],
  "meta_issues": [{"page": string, "missing_tags": string[]}],
  "performance": {
    "page_speed": number,
    "core_web_vitals": {
      "lcp": number,
      "fid": number,
      "cls": number
    }
  },
  "recommendations": string[]
}"#;

pub const LOCAL_PROMPT_TEMPLATE: &str = r#"Analyze the local search presence of {business}.

Google Business Profile data:
{listing}

Provide analysis in this JSON format:
{
  "gmb_data": {
    "reviews": [{"rating": number, "text": string, "sentiment": string}],
    "metrics": {
      "total_reviews": number,
      "average_rating": number,
      "positive_sentiment_percentage": number
    }
  },
  "local_keywords": string[],
  "recommendations": string[]
}"#;

pub const NO_LISTING_DATA: &str =
    "No listing data is available. Base the analysis on the business name alone and leave reviews empty.";

pub const SOCIAL_PROMPT_TEMPLATE: &str = r#"Analyze these social media posts and their engagement metrics:
{posts}

Provide analysis in this JSON format:
{
  "top_performing_posts": [
    {
      "url": string,
      "platform": string,
      "engagement_score": number,
      "success_factors": string[]
    }
  ],
  "content_insights": {
    "topics": string[],
    "best_posting_times": string[],
    "engagement_patterns": string[]
  },
  "seo_impact": {
    "social_signals": number,
    "brand_visibility": number,
    "traffic_potential": number,
    "recommendations": string[]
  }
}

Scores are on a 0-100 scale."#;
