pub mod cache;
pub mod extract;
pub mod fetcher;
pub mod normalize;
pub mod profile;
pub mod selectors;
pub mod trade;
pub mod traits;

pub use cache::PriceCache;
pub use fetcher::HttpFetcher;
pub use profile::ProfileScraper;
pub use selectors::{ProfileSelectors, TradeSelectors};
pub use trade::TradeScraper;
pub use traits::{Clock, ManualClock, PageFetcher, SystemClock};
