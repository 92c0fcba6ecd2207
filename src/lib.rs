pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;

pub use config::ScoutConfig;
pub use error::{Result, RetryStrategy, ScoutError};
