//! Listing enumeration: one pass over the cards of a rendered results page.

use crate::detail::DetailPanel;
use crate::extractor::{self, extract_field};
use crate::selectors;
use crate::timing::Timing;
use jobsift_browser::PageDriver;
use jobsift_core::{CityQuery, JobPosting};
use jobsift_store::RecordSink;

/// Walks the cards of the currently rendered page in DOM order and hands
/// one assembled [`JobPosting`] per card to the sink.
///
/// Per-card guarantee: no single card's extraction failure aborts the
/// remaining cards. Only a sink append failure stops the page, since
/// records already extracted must not be silently dropped.
pub struct ListingEnumerator<'a> {
    driver: &'a dyn PageDriver,
    timing: &'a Timing,
}

impl<'a> ListingEnumerator<'a> {
    /// Create an enumerator over the given driver.
    #[must_use]
    pub fn new(driver: &'a dyn PageDriver, timing: &'a Timing) -> Self {
        Self { driver, timing }
    }

    /// Scrape every card on the current page, appending each posting to the
    /// sink as it completes. Returns the number of postings appended.
    pub async fn scrape_page(
        &self,
        query: &CityQuery,
        sink: &mut dyn RecordSink,
    ) -> crate::Result<u32> {
        let cards = self
            .driver
            .element_count(selectors::JOB_CARD)
            .await
            .unwrap_or(0);

        let mut appended = 0;
        for index in 0..cards {
            let posting = self.scrape_card(index).await;
            tracing::debug!("Saving job post {} of {}", index + 1, cards);
            sink.append(query, &posting)?;
            appended += 1;
        }

        Ok(appended)
    }

    /// Extract one card into a posting. Never fails: every miss resolves to
    /// the field's default.
    async fn scrape_card(&self, index: usize) -> JobPosting {
        if self
            .driver
            .scroll_into_view_at(selectors::JOB_CARD, index)
            .await
            .is_err()
        {
            tracing::trace!("Card {} did not scroll into view", index + 1);
        }
        tokio::time::sleep(self.timing.card_settle).await;

        tracing::debug!("Selecting job {}", index + 1);
        self.select_card(index).await;

        let job_title = extract_field(self.driver, index, &extractor::JOB_TITLE, self.timing).await;
        let listing_url =
            extract_field(self.driver, index, &extractor::LISTING_URL, self.timing).await;
        let salary = extract_field(self.driver, index, &extractor::SALARY, self.timing).await;
        let location = extract_field(self.driver, index, &extractor::LOCATION, self.timing).await;
        let job_type = extract_field(self.driver, index, &extractor::JOB_TYPE, self.timing).await;
        let date_posted =
            extract_field(self.driver, index, &extractor::DATE_POSTED, self.timing).await;
        let company_name =
            extract_field(self.driver, index, &extractor::COMPANY_NAME, self.timing).await;

        // job_url aliases listing_url: the rendered page exposes no
        // independent source element for it.
        let job_url = listing_url.clone();

        let panel = DetailPanel::enter(self.driver, self.timing).await;
        let reviews = panel.read_reviews(self.driver, self.timing).await;
        panel.exit(self.driver).await;

        JobPosting {
            job_title,
            salary,
            job_type,
            location,
            company_name,
            date_posted,
            reviews,
            job_url,
            listing_url,
        }
    }

    /// Best-effort card selection, attempted twice.
    ///
    /// Each attempt tries the card root first, then a nested card element;
    /// the click target is unreliable across postings, and total failure is
    /// tolerated because most fields extract from the list view regardless
    /// of selection state.
    async fn select_card(&self, index: usize) {
        for attempt in 1..=2 {
            if self
                .driver
                .hover_and_click(selectors::JOB_CARD, index)
                .await
                .is_ok()
            {
                continue;
            }
            if self
                .driver
                .hover_and_click_within(selectors::JOB_CARD, index, selectors::JOB_CARD_INNER)
                .await
                .is_err()
            {
                tracing::trace!("Card {} ignored click attempt {}", index + 1, attempt);
            }
        }
    }
}
