//! Wait and settle delays for the pipeline.

use std::time::Duration;

/// All timeouts and settle delays in one place.
///
/// Defaults are the production values; scripted drivers in tests resolve
/// waits immediately, so only the settle delays matter for test runtime.
#[derive(Debug, Clone)]
pub struct Timing {
    /// Wait for the results container to become visible (fatal on expiry)
    pub results: Duration,
    /// Wait for the primary total-count indicator
    pub count_primary: Duration,
    /// Wait for the legacy total-count indicator
    pub count_secondary: Duration,
    /// Settle delay after each page navigation, before content is trusted
    pub page_settle: Duration,
    /// Settle delay after scrolling a card into view
    pub card_settle: Duration,
    /// Wait for the embedded detail frame to exist
    pub frame: Duration,
    /// Wait for the ratings count inside the detail context
    pub reviews: Duration,
    /// Poll interval for all visibility waits
    pub poll: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            results: Duration::from_secs(30),
            count_primary: Duration::from_secs(30),
            count_secondary: Duration::from_secs(5),
            page_settle: Duration::from_secs(3),
            card_settle: Duration::from_secs(1),
            frame: Duration::from_secs(5),
            reviews: Duration::from_secs(3),
            poll: Duration::from_millis(10),
        }
    }
}

impl Timing {
    /// Zero settle delays, for drivers that resolve waits without polling.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            results: Duration::ZERO,
            count_primary: Duration::ZERO,
            count_secondary: Duration::ZERO,
            page_settle: Duration::ZERO,
            card_settle: Duration::ZERO,
            frame: Duration::ZERO,
            reviews: Duration::ZERO,
            poll: Duration::ZERO,
        }
    }
}
