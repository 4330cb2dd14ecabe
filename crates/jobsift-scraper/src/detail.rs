//! Detail panel context switching.
//!
//! Some postings render extended detail in an embedded frame. Entry is
//! best-effort: when the frame is absent the read context stays in the
//! outer document and detail-only fields fall back to their defaults.
//! Exit is unconditional and must be called for every entry, so each card
//! starts and ends extraction in the outer context.

use crate::selectors;
use crate::timing::Timing;
use jobsift_browser::PageDriver;

/// Default for the ratings count when the detail context yields nothing.
pub const REVIEWS_DEFAULT: &str = "Reviews Not Found";

/// Paired enter/exit handle for the embedded detail context.
pub struct DetailPanel {
    entered: bool,
}

impl DetailPanel {
    /// Try to switch into the detail frame.
    ///
    /// Absence of the frame is not an error; extraction simply continues
    /// in the outer context.
    pub async fn enter(driver: &dyn PageDriver, timing: &Timing) -> Self {
        let entered = match driver
            .wait_until_visible(selectors::DETAIL_FRAME, timing.frame, timing.poll)
            .await
        {
            Ok(()) => driver.enter_frame(selectors::DETAIL_FRAME).await.is_ok(),
            Err(_) => false,
        };

        if entered {
            tracing::debug!("Switched into detail frame");
        } else {
            tracing::debug!("No detail frame for this card");
        }

        Self { entered }
    }

    /// Whether the detail frame was actually entered.
    #[must_use]
    pub fn in_detail_context(&self) -> bool {
        self.entered
    }

    /// Read the ratings count from the current context.
    pub async fn read_reviews(&self, driver: &dyn PageDriver, timing: &Timing) -> String {
        match driver
            .wait_until_visible(selectors::RATINGS_COUNT, timing.reviews, timing.poll)
            .await
        {
            Ok(()) => match driver.text_at(selectors::RATINGS_COUNT, 0).await {
                Ok(text) => {
                    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                    if text.is_empty() {
                        REVIEWS_DEFAULT.to_string()
                    } else {
                        text
                    }
                }
                Err(_) => REVIEWS_DEFAULT.to_string(),
            },
            Err(_) => REVIEWS_DEFAULT.to_string(),
        }
    }

    /// Restore the outer context. Always called, even when entry failed;
    /// the driver treats a redundant exit as a no-op.
    pub async fn exit(self, driver: &dyn PageDriver) {
        if driver.exit_frame().await.is_err() {
            tracing::warn!("Failed to restore outer context");
        }
    }
}
