use crate::error::{Result, ScoutError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Settings shared by both scrapers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Origin of the citizen and organization pages
    pub profile_base_url: String,
    /// Origin of the commodity pages
    pub trade_base_url: String,
    pub timeout_secs: u64,
    pub max_redirects: usize,
    /// Freshness window for commodity price reports
    pub cache_ttl_hours: i64,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            profile_base_url: "https://robertsspaceindustries.com".to_string(),
            trade_base_url: "https://uexcorp.space".to_string(),
            timeout_secs: 10,
            max_redirects: 5,
            cache_ttl_hours: 24,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

impl ScoutConfig {
    /// Defaults overridden by `SCOUT_*` environment variables (a `.env` file
    /// is read first when present).
    pub fn from_env() -> Result<Self> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }

        let mut config = Self::default();
        if let Ok(url) = env::var("SCOUT_PROFILE_BASE_URL") {
            config.profile_base_url = url;
        }
        if let Ok(url) = env::var("SCOUT_TRADE_BASE_URL") {
            config.trade_base_url = url;
        }
        if let Some(secs) = parse_var("SCOUT_TIMEOUT_SECS")? {
            config.timeout_secs = secs;
        }
        if let Some(hops) = parse_var("SCOUT_MAX_REDIRECTS")? {
            config.max_redirects = hops;
        }
        if let Some(hours) = parse_var("SCOUT_CACHE_TTL_HOURS")? {
            config.cache_ttl_hours = hours;
        }
        config.cache_ttl()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Cache freshness window; must be a positive, representable number of hours.
    pub fn cache_ttl(&self) -> Result<chrono::Duration> {
        match chrono::Duration::try_hours(self.cache_ttl_hours) {
            Some(ttl) if self.cache_ttl_hours > 0 => Ok(ttl),
            _ => Err(ScoutError::Config(format!(
                "cache_ttl_hours must be a positive number of hours, got {}",
                self.cache_ttl_hours
            ))),
        }
    }

    pub fn profile_url(&self) -> Result<Url> {
        parse_url(&self.profile_base_url)
    }

    pub fn trade_url(&self) -> Result<Url> {
        parse_url(&self.trade_base_url)
    }
}

/// `base` with `segments` appended to its path, each one percent-encoded.
/// An empty last segment leaves a trailing slash.
pub fn page_url(base: &Url, segments: &[&str]) -> String {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url.to_string()
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| ScoutError::Config(format!("invalid base URL {raw:?}: {e}")))
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ScoutError::Config(format!("{name} must be a number, got {raw:?}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_requirements() {
        let config = ScoutConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.cache_ttl().unwrap(), chrono::Duration::hours(24));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.profile_url().is_ok());
        assert!(config.trade_url().is_ok());
    }

    #[test]
    fn rejects_unusable_cache_ttl() {
        for hours in [i64::MAX / 2, 0, -1] {
            let config = ScoutConfig {
                cache_ttl_hours: hours,
                ..ScoutConfig::default()
            };
            assert!(matches!(config.cache_ttl(), Err(ScoutError::Config(_))));
        }
    }

    #[test]
    fn page_url_encodes_each_segment() {
        let base = Url::parse("https://robertsspaceindustries.com").unwrap();
        assert_eq!(
            page_url(&base, &["citizens", "Ace#1?x y"]),
            "https://robertsspaceindustries.com/citizens/Ace%231%3Fx%20y"
        );
        assert_eq!(
            page_url(&base, &["commodities", ""]),
            "https://robertsspaceindustries.com/commodities/"
        );
    }

    #[test]
    fn rejects_relative_base_url() {
        let config = ScoutConfig {
            trade_base_url: "uexcorp.space".to_string(),
            ..ScoutConfig::default()
        };
        assert!(matches!(config.trade_url(), Err(ScoutError::Config(_))));
    }

    #[test]
    fn rejects_non_numeric_override() {
        env::set_var("SCOUT_TEST_BAD_NUMBER", "ten");
        let parsed: Result<Option<u64>> = parse_var("SCOUT_TEST_BAD_NUMBER");
        assert!(matches!(parsed, Err(ScoutError::Config(_))));
        env::remove_var("SCOUT_TEST_BAD_NUMBER");

        let missing: Option<u64> = parse_var("SCOUT_TEST_UNSET_VAR").unwrap();
        assert!(missing.is_none());
    }
}
