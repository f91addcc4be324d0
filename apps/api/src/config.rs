use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing. Provider keys are
/// optional; endpoints that need a missing key report it per request.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub serp_api_key: Option<String>,
    pub moz_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub gmb_access_token: Option<String>,
    pub gmb_account_id: Option<String>,
    pub search_console_access_token: Option<String>,
    pub site_url: Option<String>,
    pub twitter_bearer_token: Option<String>,
    /// Account handle whose recent posts are analysed, without the `@`.
    pub twitter_handle: Option<String>,
    pub linkedin_access_token: Option<String>,
    /// Author URN, e.g. `urn:li:person:abc123`.
    pub linkedin_author_urn: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            serp_api_key: optional_env("SERP_API_KEY"),
            moz_api_key: optional_env("MOZ_API_KEY"),
            google_api_key: optional_env("GOOGLE_API_KEY"),
            gmb_access_token: optional_env("GMB_ACCESS_TOKEN"),
            gmb_account_id: optional_env("GMB_ACCOUNT_ID"),
            search_console_access_token: optional_env("SEARCH_CONSOLE_ACCESS_TOKEN"),
            site_url: optional_env("SITE_URL"),
            twitter_bearer_token: optional_env("TWITTER_BEARER_TOKEN"),
            twitter_handle: optional_env("TWITTER_HANDLE")
                .map(|handle| handle.trim_start_matches('@').to_string()),
            linkedin_access_token: optional_env("LINKEDIN_ACCESS_TOKEN"),
            linkedin_author_urn: optional_env("LINKEDIN_AUTHOR_URN"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_blank_is_none() {
        std::env::set_var("SEOGENIUS_TEST_BLANK_KEY", "   ");
        assert_eq!(optional_env("SEOGENIUS_TEST_BLANK_KEY"), None);
    }

    #[test]
    fn test_optional_env_trims_value() {
        std::env::set_var("SEOGENIUS_TEST_SET_KEY", " abc ");
        assert_eq!(
            optional_env("SEOGENIUS_TEST_SET_KEY"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_require_env_missing_names_the_key() {
        let err = require_env("SEOGENIUS_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("SEOGENIUS_TEST_DEFINITELY_UNSET"));
    }
}
