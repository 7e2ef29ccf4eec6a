use crate::clock::{Clock, SystemClock};
use crate::cms_client::CmsClient;
use crate::errors::ScrapeError;
use crate::extractor::{PageExtractor, RegexExtractor};
use crate::models::ContributionReport;
use crate::parser::parse_contributions;

/// Fetches a user's CMS page and turns it into a report.
pub struct ContributionScraper<E = RegexExtractor, C = SystemClock> {
    client: CmsClient,
    extractor: E,
    clock: C,
}

impl ContributionScraper {
    pub fn new(client: CmsClient) -> Self {
        Self {
            client,
            extractor: RegexExtractor,
            clock: SystemClock,
        }
    }
}

impl<E: PageExtractor, C: Clock> ContributionScraper<E, C> {
    /// Builds a scraper with a custom extractor and time source.
    pub fn with_parts(client: CmsClient, extractor: E, clock: C) -> Self {
        Self {
            client,
            extractor,
            clock,
        }
    }

    /// One fetch, one transform. Any failure is returned unchanged.
    pub async fn fetch_contributions(
        &self,
        user_id: &str,
    ) -> Result<ContributionReport, ScrapeError> {
        let html = self.client.fetch_user_page(user_id).await?;
        let report = parse_contributions(
            &html,
            user_id,
            self.client.base_url(),
            &self.extractor,
            &self.clock,
        )?;

        tracing::info!(
            "Assembled report for {} ({} contributions)",
            report.username,
            report.total_count
        );
        Ok(report)
    }
}
