//! Field extraction from parsed pages.
//!
//! Nothing in here fails. A selector that matches nothing yields an empty
//! string or zero so one missing field never loses the rest of the record.

use crate::models::{
    HitHistory, InventoryStats, Organization, PriceStats, SellLocation, TradeCommodity,
};
use crate::scrapers::normalize::{
    clean_enlisted_date, clean_location, clean_text, extract_member_count, extract_number,
    parse_scu_box_sizes,
};
use crate::scrapers::selectors::{ProfileMarkup, TradeMarkup};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Label used for every selling location
pub const TERMINAL_KIND: &str = "Terminal";

/// Identity fields read from a citizen page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub handle: String,
    pub display_name: String,
    pub citizen_record: String,
    pub enlisted: String,
    pub location: String,
    pub avatar_url: String,
}

fn element_text(el: ElementRef) -> String {
    clean_text(&el.text().collect::<String>())
}

fn first_text(scope: ElementRef, selector: &Selector) -> String {
    scope.select(selector).next().map(element_text).unwrap_or_default()
}

fn first_attr(scope: ElementRef, selector: &Selector, attr: &str) -> String {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Text of the value element inside the `index`th entry, or of the whole
/// entry when it has no value element.
fn nth_entry_value(scope: ElementRef, entry: &Selector, value: &Selector, index: usize) -> String {
    scope
        .select(entry)
        .nth(index)
        .map(|el| match el.select(value).next() {
            Some(v) => element_text(v),
            None => element_text(el),
        })
        .unwrap_or_default()
}

/// Resolve a possibly relative image path against the page origin.
pub fn absolute_url(base: &Url, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    base.join(raw)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn extract_profile(
    doc: &Html,
    markup: &ProfileMarkup,
    handle: &str,
    base: &Url,
) -> ProfileFields {
    let root = doc.root_element();
    let entry_value = |entry: &Selector, index: usize| {
        nth_entry_value(root, entry, &markup.entry_value, index)
    };

    let mut page_handle = entry_value(&markup.profile_entry, markup.handle_index);
    if page_handle.is_empty() {
        page_handle = handle.to_string();
    }

    let enlisted = entry_value(&markup.bio_entry, markup.enlisted_index);
    let location = entry_value(&markup.bio_entry, markup.location_index);

    ProfileFields {
        display_name: entry_value(&markup.profile_entry, markup.display_name_index),
        citizen_record: first_text(root, &markup.citizen_record),
        enlisted: clean_enlisted_date(&enlisted),
        location: clean_location(&location, handle),
        avatar_url: absolute_url(base, &first_attr(root, &markup.avatar, "src")),
        handle: page_handle,
    }
}

/// Read one organization block (main org card or affiliation row).
pub fn extract_org(block: ElementRef, markup: &ProfileMarkup, base: &Url) -> Organization {
    let entry_value =
        |index: usize| nth_entry_value(block, &markup.org_entry, &markup.entry_value, index);

    Organization {
        name: entry_value(markup.org_name_index),
        sid: entry_value(markup.org_sid_index),
        rank: entry_value(markup.org_rank_index),
        logo_url: absolute_url(base, &first_attr(block, &markup.org_logo, "src")),
        member_count: 0,
        hit_history: HitHistory::default(),
    }
}

/// The main organization card, if the citizen page has one.
pub fn extract_main_org(doc: &Html, markup: &ProfileMarkup, base: &Url) -> Option<Organization> {
    doc.select(&markup.main_org)
        .next()
        .map(|block| extract_org(block, markup, base))
}

pub fn extract_org_member_count(doc: &Html, markup: &ProfileMarkup) -> u32 {
    extract_member_count(&first_text(doc.root_element(), &markup.member_count))
}

/// Every organization row with at least a name or a short id.
pub fn extract_affiliated_orgs(doc: &Html, markup: &ProfileMarkup, base: &Url) -> Vec<Organization> {
    doc.select(&markup.org_row)
        .map(|row| extract_org(row, markup, base))
        .filter(|org| {
            if org.is_empty() {
                debug!("Skipping organization row without name or SID");
            }
            !org.is_empty()
        })
        .collect()
}

fn slug_from_href(href: &str) -> String {
    href.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or_default()
        .to_string()
}

pub fn extract_commodities(doc: &Html, markup: &TradeMarkup) -> Vec<TradeCommodity> {
    doc.select(&markup.commodity_row)
        .filter_map(|row| {
            let link = row.select(&markup.commodity_link).next();
            let code = row
                .value()
                .attr(&markup.commodity_code_attr)
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .or_else(|| {
                    link.and_then(|a| a.value().attr("href"))
                        .map(slug_from_href)
                        .filter(|c| !c.is_empty())
                })?;
            let name = link.map(element_text).filter(|n| !n.is_empty());
            Some(TradeCommodity {
                name: name.unwrap_or_else(|| code.clone()),
                code,
            })
        })
        .collect()
}

/// Display name on a commodity page, empty when the heading is missing.
pub fn extract_commodity_name(doc: &Html, markup: &TradeMarkup) -> String {
    first_text(doc.root_element(), &markup.commodity_title)
}

/// Selling locations with a positive last price; the rest are not active
/// listings and are left out.
pub fn extract_sell_locations(doc: &Html, markup: &TradeMarkup) -> Vec<SellLocation> {
    let cols = &markup.columns;
    doc.select(&markup.sell_row)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&markup.cell).map(element_text).collect();
            let cell = |index: usize| cells.get(index).map(String::as_str).unwrap_or_default();

            let current = extract_number(cell(cols.price_last));
            if current <= 0.0 {
                debug!("Skipping inactive selling location {:?}", cell(cols.name));
                return None;
            }

            Some(SellLocation {
                name: cell(cols.name).to_string(),
                system: cell(cols.system).to_string(),
                kind: TERMINAL_KIND.to_string(),
                orbit: cell(cols.orbit).to_string(),
                faction: cell(cols.faction).to_string(),
                scu_sizes: parse_scu_box_sizes(cell(cols.box_sizes)),
                price: PriceStats {
                    current,
                    avg: extract_number(cell(cols.price_avg)),
                    min: extract_number(cell(cols.price_min)),
                    max: extract_number(cell(cols.price_max)),
                },
                inventory: InventoryStats {
                    current: extract_number(cell(cols.inventory_current)),
                    max: extract_number(cell(cols.inventory_max)),
                },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::selectors::{ProfileSelectors, TradeSelectors};

    const CITIZEN: &str = include_str!("../../tests/fixtures/citizen.html");
    const CITIZEN_NO_ORG: &str = include_str!("../../tests/fixtures/citizen_no_org.html");
    const ORG: &str = include_str!("../../tests/fixtures/org.html");
    const ORGANIZATIONS: &str = include_str!("../../tests/fixtures/organizations.html");
    const COMMODITIES: &str = include_str!("../../tests/fixtures/commodities.html");
    const SELL_LOCATIONS: &str = include_str!("../../tests/fixtures/sell_locations.html");

    fn profile_markup() -> ProfileMarkup {
        ProfileSelectors::default().compile().unwrap()
    }

    fn trade_markup() -> TradeMarkup {
        TradeSelectors::default().compile().unwrap()
    }

    fn base() -> Url {
        Url::parse("https://robertsspaceindustries.com").unwrap()
    }

    #[test]
    fn profile_fields_from_positional_entries() {
        let doc = Html::parse_document(CITIZEN);
        let fields = extract_profile(&doc, &profile_markup(), "pilotace", &base());

        assert_eq!(fields.handle, "PilotAce");
        assert_eq!(fields.display_name, "Ace Pilot");
        assert_eq!(fields.citizen_record, "#1234567");
        assert_eq!(fields.enlisted, "Jan 5, 2021");
        assert_eq!(fields.location, "United States, California");
        assert_eq!(
            fields.avatar_url,
            "https://robertsspaceindustries.com/media/abc123/heap_infobox/avatar.jpg"
        );
    }

    #[test]
    fn location_filter_uses_requested_handle() {
        let doc = Html::parse_document(CITIZEN);
        let fields = extract_profile(&doc, &profile_markup(), "California", &base());

        assert_eq!(fields.handle, "PilotAce");
        assert_eq!(fields.location, "United States");
    }

    #[test]
    fn profile_without_org_block() {
        let doc = Html::parse_document(CITIZEN_NO_ORG);
        let markup = profile_markup();
        let fields = extract_profile(&doc, &markup, "LoneWolf", &base());

        assert_eq!(fields.location, "United Kingdom, London");
        assert_eq!(fields.avatar_url, "https://cdn.example.test/avatar/default.jpg");
        assert!(extract_main_org(&doc, &markup, &base()).is_none());
    }

    #[test]
    fn missing_fields_degrade_to_empty() {
        let doc = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        let markup = profile_markup();
        let fields = extract_profile(&doc, &markup, "ghost", &base());

        assert_eq!(
            fields,
            ProfileFields {
                handle: "ghost".to_string(),
                ..ProfileFields::default()
            }
        );
        assert_eq!(extract_org_member_count(&doc, &markup), 0);
        assert!(extract_affiliated_orgs(&doc, &markup, &base()).is_empty());
    }

    #[test]
    fn main_org_card() {
        let doc = Html::parse_document(CITIZEN);
        let org = extract_main_org(&doc, &profile_markup(), &base()).unwrap();

        assert_eq!(org.name, "Test Squadron");
        assert_eq!(org.sid, "TESTSQ");
        assert_eq!(org.rank, "Captain");
        assert_eq!(
            org.logo_url,
            "https://robertsspaceindustries.com/media/org/testsq-logo.png"
        );
        assert_eq!(org.member_count, 0);
    }

    #[test]
    fn member_count_from_org_page() {
        let doc = Html::parse_document(ORG);
        assert_eq!(extract_org_member_count(&doc, &profile_markup()), 1204);
    }

    #[test]
    fn affiliated_orgs_skip_redacted_rows() {
        let doc = Html::parse_document(ORGANIZATIONS);
        let orgs = extract_affiliated_orgs(&doc, &profile_markup(), &base());

        let sids: Vec<&str> = orgs.iter().map(|o| o.sid.as_str()).collect();
        assert_eq!(sids, vec!["TESTSQ", "MINERS"]);
        assert_eq!(orgs[1].name, "Deep Core Miners");
        assert_eq!(orgs[1].rank, "Prospector");
        assert_eq!(orgs[1].logo_url, "https://cdn.example.test/miners.png");
    }

    #[test]
    fn commodities_need_a_code() {
        let doc = Html::parse_document(COMMODITIES);
        let commodities = extract_commodities(&doc, &trade_markup());

        assert_eq!(
            commodities,
            vec![
                TradeCommodity {
                    code: "gold".to_string(),
                    name: "Gold".to_string()
                },
                TradeCommodity {
                    code: "laranite".to_string(),
                    name: "Laranite".to_string()
                },
                TradeCommodity {
                    code: "agricium".to_string(),
                    name: "agricium".to_string()
                },
            ]
        );
    }

    #[test]
    fn sell_locations_by_column_offset() {
        let doc = Html::parse_document(SELL_LOCATIONS);
        let locations = extract_sell_locations(&doc, &trade_markup());

        assert_eq!(extract_commodity_name(&doc, &trade_markup()), "Gold");

        let names: Vec<&str> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Area18 TDD", "Lorville CBD", "Levski", "Ruin Station"]);

        let area18 = &locations[0];
        assert_eq!(area18.system, "Stanton");
        assert_eq!(area18.orbit, "ArcCorp");
        assert_eq!(area18.faction, "United Empire of Earth");
        assert_eq!(area18.kind, TERMINAL_KIND);
        assert_eq!(area18.scu_sizes, vec![1, 2, 4, 8, 16, 32]);
        assert_eq!(
            area18.price,
            PriceStats {
                current: 10.0,
                avg: 9.5,
                min: 8.0,
                max: 12.0
            }
        );
        assert_eq!(
            area18.inventory,
            InventoryStats {
                current: 1200.0,
                max: 5000.0
            }
        );
        assert!(locations[3].scu_sizes.is_empty());
    }

    #[test]
    fn slug_is_last_path_segment() {
        assert_eq!(slug_from_href("/commodities/info/name/gold/"), "gold");
        assert_eq!(slug_from_href("/commodities/info/name/gold?tab=1"), "gold");
        assert_eq!(slug_from_href(""), "");
    }
}
