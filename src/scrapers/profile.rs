use crate::config::{page_url, ScoutConfig};
use crate::error::Result;
use crate::models::{HitHistory, PlayerProfile};
use crate::scrapers::extract::{
    extract_affiliated_orgs, extract_main_org, extract_org_member_count, extract_profile,
};
use crate::scrapers::fetcher::HttpFetcher;
use crate::scrapers::selectors::{ProfileMarkup, ProfileSelectors};
use crate::scrapers::traits::{Clock, PageFetcher, SystemClock};
use reqwest::Url;
use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Builds a [`PlayerProfile`] from the citizen, organization and
/// affiliations pages.
pub struct ProfileScraper {
    fetcher: Arc<dyn PageFetcher>,
    clock: Arc<dyn Clock>,
    markup: ProfileMarkup,
    base_url: Url,
}

impl ProfileScraper {
    /// Scraper with the reqwest fetcher, wall clock and current markup.
    pub fn new(config: &ScoutConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config)?);
        Self::with_parts(
            config,
            fetcher,
            Arc::new(SystemClock),
            &ProfileSelectors::default(),
        )
    }

    pub fn with_parts(
        config: &ScoutConfig,
        fetcher: Arc<dyn PageFetcher>,
        clock: Arc<dyn Clock>,
        selectors: &ProfileSelectors,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            clock,
            markup: selectors.compile()?,
            base_url: config.profile_url()?,
        })
    }

    fn page_url(&self, segments: &[&str]) -> String {
        page_url(&self.base_url, segments)
    }

    /// Fetch the profile of `handle`.
    ///
    /// Issues two requests, or three when the main organization has a short
    /// id. Any failed request fails the whole call.
    pub async fn get_profile_data(&self, handle: &str) -> Result<PlayerProfile> {
        info!("Scraping citizen profile for {}", handle);

        let body = self
            .fetcher
            .fetch(&self.page_url(&["citizens", handle]))
            .await?;
        let last_updated = self.clock.now();
        let (fields, main_org) = {
            let doc = Html::parse_document(&body);
            (
                extract_profile(&doc, &self.markup, handle, &self.base_url),
                extract_main_org(&doc, &self.markup, &self.base_url),
            )
        };

        let mut main_org = main_org.unwrap_or_default();
        if !main_org.sid.is_empty() {
            let body = self
                .fetcher
                .fetch(&self.page_url(&["orgs", &main_org.sid]))
                .await?;
            main_org.member_count =
                extract_org_member_count(&Html::parse_document(&body), &self.markup);
            debug!("{} has {} members", main_org.sid, main_org.member_count);
        }

        let body = self
            .fetcher
            .fetch(&self.page_url(&["citizens", handle, "organizations"]))
            .await?;
        let affiliated_orgs =
            extract_affiliated_orgs(&Html::parse_document(&body), &self.markup, &self.base_url);

        info!(
            "Scraped profile {} ({} affiliated organizations)",
            fields.handle,
            affiliated_orgs.len()
        );

        Ok(PlayerProfile {
            id: Uuid::new_v4().to_string(),
            handle: fields.handle,
            display_name: fields.display_name,
            citizen_record: fields.citizen_record,
            enlisted: fields.enlisted,
            location: fields.location,
            avatar_url: fields.avatar_url,
            main_org,
            affiliated_orgs,
            hit_history: HitHistory::default(),
            last_updated,
        })
    }
}
