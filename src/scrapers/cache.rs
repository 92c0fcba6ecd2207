use crate::models::CommodityPriceReport;
use crate::scrapers::traits::Clock;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: CommodityPriceReport,
    timestamp: DateTime<Utc>,
}

/// Commodity price reports keyed by lower-cased commodity code.
///
/// Expiry is lazy: an entry older than the TTL is ignored on read and
/// replaced on the next insert, but never removed on its own.
pub struct PriceCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl PriceCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    fn key(code: &str) -> String {
        code.to_lowercase()
    }

    /// Fresh report for `code`, if any.
    pub fn get(&self, code: &str) -> Option<CommodityPriceReport> {
        let entry = self.entries.get(&Self::key(code))?;
        if self.clock.now() - entry.timestamp < self.ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    pub fn insert(&self, code: &str, data: CommodityPriceReport) {
        let entry = CacheEntry {
            data,
            timestamp: self.clock.now(),
        };
        self.entries.insert(Self::key(code), entry);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
