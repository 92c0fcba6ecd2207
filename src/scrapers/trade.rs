use crate::config::{page_url, ScoutConfig};
use crate::error::{Result, ScoutError};
use crate::models::{CommodityPriceReport, SellLocation, TradeCommodity};
use crate::scrapers::cache::PriceCache;
use crate::scrapers::extract::{
    extract_commodities, extract_commodity_name, extract_sell_locations,
};
use crate::scrapers::fetcher::HttpFetcher;
use crate::scrapers::selectors::{TradeMarkup, TradeSelectors};
use crate::scrapers::traits::{Clock, PageFetcher, SystemClock};
use reqwest::Url;
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Commodity listing and sell-side prices, with a per-commodity cache
pub struct TradeScraper {
    fetcher: Arc<dyn PageFetcher>,
    clock: Arc<dyn Clock>,
    markup: TradeMarkup,
    base_url: Url,
    cache: PriceCache,
}

impl TradeScraper {
    /// Scraper with the reqwest fetcher, wall clock and current markup.
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config)?);
        Self::with_parts(
            config,
            fetcher,
            Arc::new(SystemClock),
            &TradeSelectors::default(),
        )
    }

    pub fn with_parts(
        config: &ScoutConfig,
        fetcher: Arc<dyn PageFetcher>,
        clock: Arc<dyn Clock>,
        selectors: &TradeSelectors,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            markup: selectors.compile()?,
            base_url: config.trade_url()?,
            cache: PriceCache::new(config.cache_ttl()?, clock.clone()),
            clock,
        })
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    fn page_url(&self, segments: &[&str]) -> String {
        page_url(&self.base_url, segments)
    }

    pub async fn get_commodities(&self) -> Result<Vec<TradeCommodity>> {
        let body = self.fetcher.fetch(&self.page_url(&["commodities", ""])).await?;
        let commodities = extract_commodities(&Html::parse_document(&body), &self.markup);
        info!("Found {} commodities", commodities.len());
        Ok(commodities)
    }

    /// Sell-side report for `code`, served from the cache while fresh.
    pub async fn get_commodity_prices(&self, code: &str) -> Result<CommodityPriceReport> {
        let code = code.to_lowercase();
        if let Some(report) = self.cache.get(&code) {
            debug!("Cache hit for {}", code);
            return Ok(report);
        }
        info!("Cache miss for {}, fetching selling locations", code);

        let url = self.page_url(&[
            "commodities",
            "info",
            "name",
            &code,
            "tab",
            "locations_selling",
            "",
        ]);
        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                warn!("Commodity {} not found upstream", code);
                return Err(ScoutError::CommodityNotFound { code });
            }
            Err(e) => return Err(e),
        };

        let (name, locations) = {
            let doc = Html::parse_document(&body);
            (
                extract_commodity_name(&doc, &self.markup),
                extract_sell_locations(&doc, &self.markup),
            )
        };

        let report = CommodityPriceReport {
            commodity: if name.is_empty() { code.clone() } else { name },
            best_sell_location: best_sell_location(&locations).cloned(),
            average_price: average_price(&locations),
            locations,
            last_updated: self.clock.now(),
            code: code.clone(),
        };
        info!(
            "Scraped {} selling locations for {}",
            report.locations.len(),
            code
        );

        self.cache.insert(&code, report.clone());
        Ok(report)
    }
}

/// Highest current price; on a tie the earlier location wins.
pub fn best_sell_location(locations: &[SellLocation]) -> Option<&SellLocation> {
    let mut best: Option<&SellLocation> = None;
    for location in locations {
        match best {
            Some(b) if location.price.current <= b.price.current => {}
            _ => best = Some(location),
        }
    }
    best
}

/// Unweighted mean of current prices, zero without locations.
pub fn average_price(locations: &[SellLocation]) -> f64 {
    if locations.is_empty() {
        return 0.0;
    }
    let total: f64 = locations.iter().map(|l| l.price.current).sum();
    total / locations.len() as f64
}
