//! Where each logical field lives in the upstream markup.
//!
//! Some fields have no stable class or id upstream and are addressed by
//! position ("2nd info entry", "8th table cell"). All of that is kept here so
//! markup drift is a one-place change. Bump [`MARKUP_VERSION`] whenever the
//! defaults are updated for a new page shape.

use crate::error::{Result, ScoutError};
use scraper::Selector;
use serde::{Deserialize, Serialize};

pub const MARKUP_VERSION: &str = "2024.1";

fn compile(field: &'static str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScoutError::Selector {
        field,
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Selector paths for the citizen, organization and affiliation pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSelectors {
    pub version: String,
    /// Info entries of the profile card
    pub profile_entry: String,
    /// Value element inside any info entry
    pub entry_value: String,
    pub display_name_index: usize,
    pub handle_index: usize,
    pub avatar: String,
    pub citizen_record: String,
    /// Entries of the biography column (enlisted, location, fluency)
    pub bio_entry: String,
    pub enlisted_index: usize,
    pub location_index: usize,
    pub main_org: String,
    /// One block per organization on the affiliations page
    pub org_row: String,
    /// Info entries inside an organization block
    pub org_entry: String,
    pub org_name_index: usize,
    pub org_sid_index: usize,
    pub org_rank_index: usize,
    pub org_logo: String,
    /// Member count on an organization's own page
    pub member_count: String,
}

impl Default for ProfileSelectors {
    fn default() -> Self {
        Self {
            version: MARKUP_VERSION.to_string(),
            profile_entry: ".profile .info .entry".to_string(),
            entry_value: ".value".to_string(),
            display_name_index: 0,
            handle_index: 1,
            avatar: ".profile .thumb img".to_string(),
            citizen_record: ".citizen-record .value".to_string(),
            bio_entry: ".profile-content > .left-col .entry".to_string(),
            enlisted_index: 0,
            location_index: 1,
            main_org: ".main-org".to_string(),
            org_row: ".orgs-content .org".to_string(),
            org_entry: ".info .entry".to_string(),
            org_name_index: 0,
            org_sid_index: 1,
            org_rank_index: 2,
            org_logo: ".thumb img".to_string(),
            member_count: ".logo .count".to_string(),
        }
    }
}

/// Parsed form of [`ProfileSelectors`]
#[derive(Debug, Clone)]
pub struct ProfileMarkup {
    pub profile_entry: Selector,
    pub entry_value: Selector,
    pub display_name_index: usize,
    pub handle_index: usize,
    pub avatar: Selector,
    pub citizen_record: Selector,
    pub bio_entry: Selector,
    pub enlisted_index: usize,
    pub location_index: usize,
    pub main_org: Selector,
    pub org_row: Selector,
    pub org_entry: Selector,
    pub org_name_index: usize,
    pub org_sid_index: usize,
    pub org_rank_index: usize,
    pub org_logo: Selector,
    pub member_count: Selector,
}

impl ProfileSelectors {
    pub fn compile(&self) -> Result<ProfileMarkup> {
        Ok(ProfileMarkup {
            profile_entry: compile("profile_entry", &self.profile_entry)?,
            entry_value: compile("entry_value", &self.entry_value)?,
            display_name_index: self.display_name_index,
            handle_index: self.handle_index,
            avatar: compile("avatar", &self.avatar)?,
            citizen_record: compile("citizen_record", &self.citizen_record)?,
            bio_entry: compile("bio_entry", &self.bio_entry)?,
            enlisted_index: self.enlisted_index,
            location_index: self.location_index,
            main_org: compile("main_org", &self.main_org)?,
            org_row: compile("org_row", &self.org_row)?,
            org_entry: compile("org_entry", &self.org_entry)?,
            org_name_index: self.org_name_index,
            org_sid_index: self.org_sid_index,
            org_rank_index: self.org_rank_index,
            org_logo: compile("org_logo", &self.org_logo)?,
            member_count: compile("member_count", &self.member_count)?,
        })
    }
}

/// Cell offsets of the selling-locations table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SellColumns {
    pub name: usize,
    pub system: usize,
    pub orbit: usize,
    pub faction: usize,
    pub box_sizes: usize,
    pub inventory_current: usize,
    pub inventory_max: usize,
    pub price_last: usize,
    pub price_avg: usize,
    pub price_min: usize,
    pub price_max: usize,
}

impl Default for SellColumns {
    fn default() -> Self {
        Self {
            name: 0,
            system: 1,
            orbit: 2,
            faction: 3,
            box_sizes: 4,
            inventory_current: 5,
            inventory_max: 6,
            price_last: 7,
            price_avg: 8,
            price_min: 9,
            price_max: 10,
        }
    }
}

/// Selector paths for the commodity listing and selling-locations tab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSelectors {
    pub version: String,
    pub commodity_row: String,
    /// Row attribute carrying the commodity slug
    pub commodity_code_attr: String,
    pub commodity_link: String,
    /// Commodity name heading on the selling-locations tab
    pub commodity_title: String,
    pub sell_row: String,
    pub cell: String,
    pub columns: SellColumns,
}

impl Default for TradeSelectors {
    fn default() -> Self {
        Self {
            version: MARKUP_VERSION.to_string(),
            commodity_row: "#table-commodities tbody tr".to_string(),
            commodity_code_attr: "data-code".to_string(),
            commodity_link: "a".to_string(),
            commodity_title: "h1".to_string(),
            sell_row: "#table-sell tbody tr".to_string(),
            cell: "td".to_string(),
            columns: SellColumns::default(),
        }
    }
}

/// Parsed form of [`TradeSelectors`]
#[derive(Debug, Clone)]
pub struct TradeMarkup {
    pub commodity_row: Selector,
    pub commodity_code_attr: String,
    pub commodity_link: Selector,
    pub commodity_title: Selector,
    pub sell_row: Selector,
    pub cell: Selector,
    pub columns: SellColumns,
}

impl TradeSelectors {
    pub fn compile(&self) -> Result<TradeMarkup> {
        Ok(TradeMarkup {
            commodity_row: compile("commodity_row", &self.commodity_row)?,
            commodity_code_attr: self.commodity_code_attr.clone(),
            commodity_link: compile("commodity_link", &self.commodity_link)?,
            commodity_title: compile("commodity_title", &self.commodity_title)?,
            sell_row: compile("sell_row", &self.sell_row)?,
            cell: compile("cell", &self.cell)?,
            columns: self.columns,
        })
    }
}
