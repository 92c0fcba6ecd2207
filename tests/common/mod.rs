#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use mockito::{Mock, ServerGuard};
use std::sync::Arc;
use verse_scout::scrapers::{HttpFetcher, ManualClock};
use verse_scout::ScoutConfig;

pub const CITIZEN: &str = include_str!("../fixtures/citizen.html");
pub const CITIZEN_NO_ORG: &str = include_str!("../fixtures/citizen_no_org.html");
pub const ORG: &str = include_str!("../fixtures/org.html");
pub const ORGANIZATIONS: &str = include_str!("../fixtures/organizations.html");
pub const COMMODITIES: &str = include_str!("../fixtures/commodities.html");
pub const SELL_LOCATIONS: &str = include_str!("../fixtures/sell_locations.html");

/// Config with both origins pointed at the mock server
pub fn config_for(server: &ServerGuard) -> ScoutConfig {
    ScoutConfig {
        profile_base_url: server.url(),
        trade_base_url: server.url(),
        ..ScoutConfig::default()
    }
}

pub fn fetcher_for(config: &ScoutConfig) -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new(config).unwrap())
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
    ))
}

/// Serve `body` as HTML on `path`, expecting `hits` requests
pub async fn mock_page(server: &mut ServerGuard, path: &str, body: &str, hits: usize) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .expect(hits)
        .create_async()
        .await
}

/// Selling-locations tab with one row per (terminal, last price)
pub fn sell_table(commodity: &str, rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(terminal, price)| {
            format!(
                "<tr><td>{terminal}</td><td>Stanton</td><td>Hurston</td><td>Independent</td>\
                 <td>1-8</td><td>100</td><td>1000</td><td>{price}</td><td>{price}</td>\
                 <td>{price}</td><td>{price}</td></tr>"
            )
        })
        .collect();
    format!(
        "<html><body><h1>{commodity}</h1><table id=\"table-sell\"><tbody>{rows}</tbody></table></body></html>"
    )
}
