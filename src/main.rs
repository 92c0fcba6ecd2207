use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use verse_scout::scrapers::{ProfileScraper, TradeScraper};
use verse_scout::ScoutConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ScoutConfig::from_env()?;
    info!("🛰️  Verse Scout");
    info!("Profiles from {}", config.profile_base_url);
    info!("Trade data from {}", config.trade_base_url);

    let profiles = ProfileScraper::new(&config)?;
    let trade = TradeScraper::new(&config)?;

    match env::var("SCOUT_HANDLE") {
        Ok(handle) => {
            let profile = profiles.get_profile_data(&handle).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Err(_) => info!("SCOUT_HANDLE not set, skipping profile lookup"),
    }

    let commodities = trade.get_commodities().await?;
    info!("✅ {} commodities listed", commodities.len());

    let code = match env::var("SCOUT_COMMODITY") {
        Ok(code) => code,
        Err(_) => match commodities.first() {
            Some(first) => first.code.clone(),
            None => {
                warn!("No commodities found - nothing to price");
                return Ok(());
            }
        },
    };

    match trade.get_commodity_prices(&code).await {
        Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        Err(e) => {
            warn!("Price lookup for {} failed: {}", code, e);
            println!("{}", e.user_message());
        }
    }

    Ok(())
}
