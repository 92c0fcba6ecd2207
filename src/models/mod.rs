use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report counters attached to players and organizations.
///
/// The profile site exposes no such data, so scraped values are always zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HitHistory {
    pub total: u32,
    pub last_30_days: u32,
}

/// Organization as embedded in a player profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    /// Spectrum short id
    pub sid: String,
    pub rank: String,
    pub logo_url: String,
    /// Zero until the organization page has been fetched
    pub member_count: u32,
    pub hit_history: HitHistory,
}

impl Organization {
    /// True when neither a name nor a short id could be read.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.sid.is_empty()
    }
}

/// Aggregate profile built from the citizen pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub citizen_record: String,
    pub enlisted: String,
    pub location: String,
    pub avatar_url: String,
    pub main_org: Organization,
    pub affiliated_orgs: Vec<Organization>,
    pub hit_history: HitHistory,
    pub last_updated: DateTime<Utc>,
}

/// Entry of the commodities listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradeCommodity {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceStats {
    pub current: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventoryStats {
    pub current: f64,
    pub max: f64,
}

/// A terminal buying the commodity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SellLocation {
    pub name: String,
    pub system: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub orbit: String,
    pub faction: String,
    /// Container sizes accepted, ascending powers of two
    pub scu_sizes: Vec<u32>,
    pub price: PriceStats,
    pub inventory: InventoryStats,
}

/// Sell-side price overview for one commodity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommodityPriceReport {
    pub commodity: String,
    pub code: String,
    pub locations: Vec<SellLocation>,
    pub best_sell_location: Option<SellLocation>,
    pub average_price: f64,
    pub last_updated: DateTime<Utc>,
}
