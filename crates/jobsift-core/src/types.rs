//! Shared types used across the Jobsift application.
//!
//! This module defines the value types that flow through the extraction
//! pipeline: the query driving a run, the normalized posting record, and the
//! pagination checkpoint state.

use crate::error::JobsiftError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of result slots per page; the job offset advances by this stride.
pub const PAGE_STRIDE: u32 = 10;

/// Newtype for a city/location query string.
///
/// One `CityQuery` drives one search run and names one destination store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityQuery(String);

impl CityQuery {
    /// Create a new `CityQuery` from a string.
    ///
    /// # Errors
    /// Returns error if the city name is empty after trimming.
    pub fn new(city: impl Into<String>) -> Result<Self, JobsiftError> {
        let city = city.into().trim().to_string();
        if city.is_empty() {
            return Err(JobsiftError::Validation(
                "city query must not be empty".to_string(),
            ));
        }
        Ok(Self(city))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One normalized job posting, immutable once written to the store.
///
/// `default()` yields the documented per-field fallback values: fields that
/// could not be resolved from the page keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Posting title from the title link
    pub job_title: String,
    /// Salary snippet, if listed
    pub salary: String,
    /// Employment type, e.g. "Full-Time"
    pub job_type: String,
    /// Company location line
    pub location: String,
    /// Company name
    pub company_name: String,
    /// Relative posting date, e.g. "3 days ago"
    pub date_posted: String,
    /// Ratings count text from the detail panel
    pub reviews: String,
    /// Absolute URL of the posting detail page
    pub job_url: String,
    /// Absolute URL of the listing entry
    pub listing_url: String,
}

impl Default for JobPosting {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            salary: String::new(),
            job_type: "Full-Time".to_string(),
            location: String::new(),
            company_name: String::new(),
            date_posted: "Today".to_string(),
            reviews: "Reviews Not Found".to_string(),
            job_url: String::new(),
            listing_url: String::new(),
        }
    }
}

impl JobPosting {
    /// Column headers of the durable store, in store order.
    pub const HEADERS: [&'static str; 9] = [
        "Job Title",
        "Salary",
        "Job Type",
        "Location",
        "Company Name",
        "Date Posted",
        "Reviews",
        "Job URL",
        "Listing URL",
    ];

    /// The posting as a store row, in the same order as [`Self::HEADERS`].
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.job_title.clone(),
            self.salary.clone(),
            self.job_type.clone(),
            self.location.clone(),
            self.company_name.clone(),
            self.date_posted.clone(),
            self.reviews.clone(),
            self.job_url.clone(),
            self.listing_url.clone(),
        ]
    }
}

/// Pagination position within one query's result set.
///
/// The offset advances by [`PAGE_STRIDE`] and the page counter by 1, in
/// lockstep. This is a resumption checkpoint, not derived from page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Total job count discovered for the query
    pub total_jobs: u32,
    /// Pages completed so far
    pub pages_scraped: u32,
    /// Total pages to scrape
    pub pages_total: u32,
    /// Result offset for the next page request
    pub job_offset: u32,
}

impl PaginationState {
    /// Create a state resuming at the given position.
    #[must_use]
    pub fn resume_at(job_offset: u32, pages_scraped: u32) -> Self {
        Self {
            total_jobs: 0,
            pages_scraped,
            pages_total: 0,
            job_offset,
        }
    }

    /// Record the discovered result count and derived page total.
    pub fn set_totals(&mut self, total_jobs: u32, pages_total: u32) {
        self.total_jobs = total_jobs;
        self.pages_total = pages_total;
    }

    /// Advance past one completed page.
    pub fn advance(&mut self) {
        self.job_offset += PAGE_STRIDE;
        self.pages_scraped += 1;
    }

    /// Whether the query's page range is exhausted.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pages_scraped >= self.pages_total
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::resume_at(0, 0)
    }
}
