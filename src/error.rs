//! Error type shared by the fetcher and both scrapers.
//!
//! Only fetching and explicit validation produce errors. Normalizers and the
//! HTML extractor degrade to empty values instead, so a `ScoutError` always
//! means an upstream request failed or the scraper was misconfigured.

use thiserror::Error;

/// User-facing message for a commodity code the trade site does not know.
pub const COMMODITY_NOT_FOUND: &str =
    "Commodity not found. Please check the commodity code and try again.";
/// User-facing message when the upstream site throttles us.
pub const RATE_LIMITED: &str = "Too many requests. Please wait a moment and try again.";
/// User-facing message when the upstream site could not be reached.
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
/// User-facing message for everything else.
pub const GENERIC_FAILURE: &str = "Failed to fetch data. Please try again later.";

#[derive(Error, Debug)]
pub enum ScoutError {
    /// Network failure or non-2xx response. `status` is set whenever the
    /// upstream answered.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch {
        url: String,
        status: Option<u16>,
        reason: String,
    },
    /// The trade site answered 404 for a commodity page.
    #[error("{}", COMMODITY_NOT_FOUND)]
    CommodityNotFound { code: String },
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Invalid selector for {field} ({selector:?}): {reason}")]
    Selector {
        field: &'static str,
        selector: String,
        reason: String,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// How a caller should treat a failed scrape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStrategy {
    /// Transient, worth another attempt after a backoff
    Retry,
    /// Permanent, retrying gives the same answer
    Fail,
}

pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Upstream status code, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            Self::CommodityNotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Classify the error for caller-level retry policies.
    pub fn retry_strategy(&self) -> RetryStrategy {
        match self {
            Self::Fetch { status: None, .. } => RetryStrategy::Retry,
            Self::Fetch {
                status: Some(code), ..
            } => match *code {
                429 => RetryStrategy::Retry,
                c if c >= 500 => RetryStrategy::Retry,
                _ => RetryStrategy::Fail,
            },
            Self::CommodityNotFound { .. }
            | Self::Client(_)
            | Self::Selector { .. }
            | Self::Config(_) => RetryStrategy::Fail,
        }
    }

    /// Message safe to show to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CommodityNotFound { .. } => COMMODITY_NOT_FOUND,
            Self::Fetch {
                status: Some(429), ..
            } => RATE_LIMITED,
            Self::Fetch { status: None, .. } => NETWORK_ERROR,
            _ => GENERIC_FAILURE,
        }
    }
}
