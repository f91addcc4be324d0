use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{send_json, DataSourceError};

const TWITTER_SEARCH_URL: &str = "https://api.twitter.com/2/tweets/search/recent";
const LINKEDIN_UGC_URL: &str = "https://api.linkedin.com/v2/ugcPosts";
const MAX_POSTS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
        }
    }

    /// Case-insensitive; `x` is accepted for Twitter.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Some(Platform::Twitter),
            "linkedin" => Some(Platform::Linkedin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
}

/// A post normalised across platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: Platform,
    pub content: String,
    pub engagement: Engagement,
    pub url: String,
    /// RFC 3339 when the platform reports a creation time.
    pub timestamp: Option<String>,
}

pub(super) async fn twitter_posts(
    client: &Client,
    bearer_token: &str,
    handle: &str,
) -> Result<Vec<SocialPost>, DataSourceError> {
    let payload: Value = send_json(
        client
            .get(TWITTER_SEARCH_URL)
            .bearer_auth(bearer_token)
            .query(&[
                ("query", format!("from:{handle}")),
                ("tweet.fields", "created_at,public_metrics".to_string()),
                ("max_results", MAX_POSTS.to_string()),
            ]),
    )
    .await?;
    Ok(parse_tweets(&payload, handle))
}

pub(super) async fn linkedin_posts(
    client: &Client,
    access_token: &str,
    author_urn: &str,
) -> Result<Vec<SocialPost>, DataSourceError> {
    // Rest.li list syntax: the parentheses stay literal, the URN is encoded.
    let url = format!(
        "{LINKEDIN_UGC_URL}?q=authors&authors=List({})&count={MAX_POSTS}",
        author_urn.replace(':', "%3A")
    );
    let payload: Value = send_json(
        client
            .get(url)
            .bearer_auth(access_token)
            .header("X-Restli-Protocol-Version", "2.0.0"),
    )
    .await?;
    Ok(parse_linkedin(&payload))
}

fn count(value: &Value, pointer: &str) -> u64 {
    value.pointer(pointer).and_then(Value::as_u64).unwrap_or(0)
}

/// A search with no matches has no `data` field at all.
pub fn parse_tweets(payload: &Value, handle: &str) -> Vec<SocialPost> {
    let Some(tweets) = payload.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };
    tweets
        .iter()
        .filter_map(|tweet| {
            let id = tweet.get("id")?.as_str()?;
            Some(SocialPost {
                platform: Platform::Twitter,
                content: tweet.get("text")?.as_str()?.to_string(),
                engagement: Engagement {
                    likes: count(tweet, "/public_metrics/like_count"),
                    shares: count(tweet, "/public_metrics/retweet_count"),
                    comments: count(tweet, "/public_metrics/reply_count"),
                },
                url: format!("https://twitter.com/{handle}/status/{id}"),
                timestamp: tweet
                    .get("created_at")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect()
}

/// Posts without share commentary (reshares, media-only) are skipped.
pub fn parse_linkedin(payload: &Value) -> Vec<SocialPost> {
    let Some(elements) = payload.get("elements").and_then(Value::as_array) else {
        return Vec::new();
    };
    elements
        .iter()
        .filter_map(|post| {
            let content = post
                .pointer("/specificContent/com.linkedin.ugc.ShareContent/shareCommentary/text")?
                .as_str()?
                .to_string();
            let url = match post.get("originalUrl").and_then(Value::as_str) {
                Some(url) => url.to_string(),
                None => format!(
                    "https://www.linkedin.com/feed/update/{}",
                    post.get("id")?.as_str()?
                ),
            };
            Some(SocialPost {
                platform: Platform::Linkedin,
                content,
                engagement: Engagement {
                    likes: count(post, "/socialMetrics/numLikes"),
                    shares: count(post, "/socialMetrics/numShares"),
                    comments: count(post, "/socialMetrics/numComments"),
                },
                url,
                timestamp: post
                    .pointer("/created/time")
                    .and_then(Value::as_i64)
                    .and_then(DateTime::<Utc>::from_timestamp_millis)
                    .map(|time| time.to_rfc3339()),
            })
        })
        .collect()
}
