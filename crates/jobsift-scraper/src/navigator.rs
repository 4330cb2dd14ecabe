//! Page navigation: result-count discovery and the page loop.

use crate::enumerator::ListingEnumerator;
use crate::error::{Result, ScrapeError};
use crate::selectors;
use crate::timing::Timing;
use crate::url::search_url;
use jobsift_browser::PageDriver;
use jobsift_core::{CityQuery, PaginationState};
use jobsift_store::{CheckpointStore, RecordSink, ResumeCheckpoint};
use regex::Regex;
use std::sync::OnceLock;

/// Page total used when neither count indicator resolves.
pub const DEFAULT_PAGES_TOTAL: u32 = 25;

/// Extract the total job count from a count-indicator text like
/// `"1,234 jobs Page 1 of"`: thousands separators and label prose are
/// stripped, then the first integer token wins.
#[must_use]
pub fn parse_total_jobs(text: &str) -> Option<u32> {
    static FIRST_INT: OnceLock<Regex> = OnceLock::new();
    let regex = FIRST_INT.get_or_init(|| Regex::new(r"\d+").expect("valid regex"));

    let stripped = text
        .replace(',', "")
        .replace("Page 1 of", "")
        .replace("jobs", "");
    regex
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Pages needed for a job count at ten results per page, rounded.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pages_for(total_jobs: u32) -> u32 {
    (f64::from(total_jobs) / 10.0).round() as u32
}

/// Drives one query across its result pages.
///
/// Discovers the page boundary, then walks pages in offset order, handing
/// each rendered page to the [`ListingEnumerator`] and persisting the
/// advanced checkpoint after every page.
pub struct PageNavigator<'a> {
    driver: &'a dyn PageDriver,
    timing: &'a Timing,
    base_url: &'a str,
    query_term: &'a str,
}

impl<'a> PageNavigator<'a> {
    /// Create a navigator for the given search endpoint.
    #[must_use]
    pub fn new(
        driver: &'a dyn PageDriver,
        timing: &'a Timing,
        base_url: &'a str,
        query_term: &'a str,
    ) -> Self {
        Self {
            driver,
            timing,
            base_url,
            query_term,
        }
    }

    /// Run the full pipeline for one query.
    ///
    /// `state` arrives seeded from the query's checkpoint; it is advanced
    /// monotonically and persisted through `checkpoints` after each page.
    pub async fn run(
        &self,
        query: &CityQuery,
        state: &mut PaginationState,
        sink: &mut dyn RecordSink,
        checkpoints: &dyn CheckpointStore,
    ) -> Result<()> {
        let first_url = search_url(self.base_url, self.query_term, query, state.job_offset)?;
        tracing::info!("Requesting: {}", first_url);
        self.driver.navigate(&first_url).await?;

        tracing::info!("Waiting for the search results to become visible");
        self.wait_for_results(query).await?;
        tracing::info!("Search results are visible");

        let (total_jobs, pages_total) = self.discover_totals().await;
        state.set_totals(total_jobs, pages_total);
        tracing::info!("Total jobs: {}, pages: {}", total_jobs, pages_total);

        let enumerator = ListingEnumerator::new(self.driver, self.timing);
        let mut jobs_scraped: u32 = 0;

        while !state.is_done() {
            let page_url = search_url(self.base_url, self.query_term, query, state.job_offset)?;
            self.driver.navigate(&page_url).await?;
            tokio::time::sleep(self.timing.page_settle).await;
            self.wait_for_results(query).await?;

            jobs_scraped += enumerator.scrape_page(query, sink).await?;
            state.advance();

            if let Err(e) = checkpoints.save(
                query,
                ResumeCheckpoint {
                    job_offset: state.job_offset,
                    pages_scraped: state.pages_scraped,
                },
            ) {
                tracing::warn!("Failed to persist checkpoint for {}: {}", query, e);
            }

            tracing::info!(
                "Pages scraped {} of {}",
                state.pages_scraped,
                state.pages_total
            );
            tracing::info!(
                "Job posts scraped {} of {}",
                jobs_scraped,
                state.total_jobs
            );
        }

        Ok(())
    }

    /// Wait for the results container; failure is fatal for the query.
    async fn wait_for_results(&self, query: &CityQuery) -> Result<()> {
        self.driver
            .wait_until_visible(selectors::RESULTS_LIST, self.timing.results, self.timing.poll)
            .await
            .map_err(|_| ScrapeError::ResultsNotVisible {
                query: query.to_string(),
            })
    }

    /// Two-tier total-count discovery with a fixed fallback.
    async fn discover_totals(&self) -> (u32, u32) {
        tracing::info!("Waiting for page count");
        if let Some(total) = self
            .read_count(selectors::COUNT_PRIMARY, self.timing.count_primary)
            .await
        {
            return (total, pages_for(total));
        }

        tracing::info!("Waiting a 2nd time for page count");
        if let Some(total) = self
            .read_count(selectors::COUNT_SECONDARY, self.timing.count_secondary)
            .await
        {
            return (total, pages_for(total));
        }

        tracing::info!("No count indicator; defaulting to {} pages", DEFAULT_PAGES_TOTAL);
        (0, DEFAULT_PAGES_TOTAL)
    }

    async fn read_count(&self, selector: &str, wait: std::time::Duration) -> Option<u32> {
        self.driver
            .wait_until_visible(selector, wait, self.timing.poll)
            .await
            .ok()?;
        let text = self.driver.text_at(selector, 0).await.ok()?;
        parse_total_jobs(&text)
    }
}
