use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use crate::scrapers::traits::PageFetcher;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{redirect, Client};
use tracing::{debug, warn};

/// reqwest-backed fetcher sending a desktop browser header set
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build the client: browser headers, fixed timeout, bounded redirects.
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user_agent", &config.user_agent)?);
        headers.insert(ACCEPT, header_value("accept", &config.accept)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("accept_language", &config.accept_language)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .redirect(redirect_policy(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }
}

/// Follow up to `max_hops` redirects. `previous` holds the original URL plus
/// every hop already taken.
fn redirect_policy(max_hops: usize) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > max_hops {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| ScoutError::Config(format!("{field} is not a valid header value: {e}")))
}

fn transport_error(url: &str, err: reqwest::Error) -> ScoutError {
    ScoutError::Fetch {
        url: url.to_string(),
        status: err.status().map(|s| s.as_u16()),
        reason: err.to_string(),
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status: {}", url, status);
            return Err(ScoutError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                reason: format!("upstream responded {status}"),
            });
        }

        let body = response.text().await.map_err(|e| transport_error(url, e))?;
        debug!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
