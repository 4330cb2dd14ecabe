//! Per-field extraction with ordered fallback probes.
//!
//! Every field owns an ordered list of probes; the first probe that
//! resolves wins and its text is normalized, otherwise the field's
//! documented default is returned. No probe failure ever escapes the
//! extractor.

use crate::selectors;
use crate::timing::Timing;
use jobsift_browser::PageDriver;
use std::time::Duration;

/// One way of resolving a field from the rendered page.
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// Text of the `card_index`-th match of a page-scoped selector.
    Text {
        /// Page-scoped selector
        selector: &'static str,
    },
    /// Text of the first `child` match inside the current card.
    TextWithin {
        /// Selector scoped to the card element
        child: &'static str,
    },
    /// Attribute of the `card_index`-th match of a page-scoped selector.
    Attribute {
        /// Page-scoped selector
        selector: &'static str,
        /// Attribute name
        name: &'static str,
    },
    /// Like [`Probe::Text`], but waits for the selector to become visible
    /// first, bounded by `wait`.
    WaitedText {
        /// Page-scoped selector
        selector: &'static str,
        /// Visibility wait before reading
        wait: Duration,
    },
}

/// A field's probes, default, and text normalization.
pub struct FieldSpec {
    /// Field name, for diagnostics
    pub name: &'static str,
    /// Ordered probes; first success wins
    pub probes: &'static [Probe],
    /// Returned when every probe fails
    pub default: &'static str,
    /// Applied to the winning probe's text
    pub normalize: fn(&str) -> String,
}

/// Posting title.
pub const JOB_TITLE: FieldSpec = FieldSpec {
    name: "job_title",
    probes: &[Probe::Text {
        selector: selectors::JOB_TITLE_LINK,
    }],
    default: "",
    normalize: clean,
};

/// Listing URL, from the title link's href.
pub const LISTING_URL: FieldSpec = FieldSpec {
    name: "listing_url",
    probes: &[Probe::Attribute {
        selector: selectors::JOB_TITLE_LINK,
        name: "href",
    }],
    default: "",
    normalize: clean,
};

/// Salary snippet.
pub const SALARY: FieldSpec = FieldSpec {
    name: "salary",
    probes: &[Probe::Text {
        selector: selectors::SALARY_SNIPPET,
    }],
    default: "",
    normalize: clean,
};

/// Company location line.
pub const LOCATION: FieldSpec = FieldSpec {
    name: "location",
    probes: &[Probe::Text {
        selector: selectors::COMPANY_LOCATION,
    }],
    default: "",
    normalize: clean,
};

/// Employment type; metadata block with the label prose stripped.
pub const JOB_TYPE: FieldSpec = FieldSpec {
    name: "job_type",
    probes: &[Probe::Text {
        selector: selectors::METADATA,
    }],
    default: "Full-Time",
    normalize: normalize_job_type,
};

/// Relative posting date; the element renders late, so the probe waits.
pub const DATE_POSTED: FieldSpec = FieldSpec {
    name: "date_posted",
    probes: &[Probe::WaitedText {
        selector: selectors::DATE_POSTED,
        wait: Duration::from_secs(3),
    }],
    default: "Today",
    normalize: normalize_date,
};

/// Company name: card-scoped first, page-scoped as fallback.
pub const COMPANY_NAME: FieldSpec = FieldSpec {
    name: "company_name",
    probes: &[
        Probe::TextWithin {
            child: selectors::COMPANY_NAME,
        },
        Probe::Text {
            selector: selectors::COMPANY_NAME,
        },
    ],
    default: "",
    normalize: clean,
};

/// Resolve one field of the card at `card_index`.
///
/// Probes run in order; the first that resolves is normalized and returned.
/// Every probe failure is isolated; total failure yields the default.
pub async fn extract_field(
    driver: &dyn PageDriver,
    card_index: usize,
    spec: &FieldSpec,
    timing: &Timing,
) -> String {
    for probe in spec.probes {
        match run_probe(driver, card_index, probe, timing).await {
            Ok(text) => return (spec.normalize)(&text),
            Err(e) => {
                tracing::trace!("Probe missed for {} on card {}: {}", spec.name, card_index, e);
            }
        }
    }
    spec.default.to_string()
}

async fn run_probe(
    driver: &dyn PageDriver,
    card_index: usize,
    probe: &Probe,
    timing: &Timing,
) -> jobsift_browser::Result<String> {
    match probe {
        Probe::Text { selector } => driver.text_at(selector, card_index).await,
        Probe::TextWithin { child } => {
            driver
                .text_within(selectors::JOB_CARD, card_index, child)
                .await
        }
        Probe::Attribute { selector, name } => {
            driver.attribute_at(selector, card_index, name).await
        }
        Probe::WaitedText { selector, wait } => {
            driver
                .wait_until_visible(selector, *wait, timing.poll)
                .await?;
            driver.text_at(selector, card_index).await
        }
    }
}

/// Trim and collapse internal whitespace runs (including newlines) to
/// single spaces.
fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Employment type: drop the `Job type` label and any colons.
fn normalize_job_type(text: &str) -> String {
    clean(&clean(text).replace("Job type", "").replace(':', ""))
}

/// Posting date: drop the `Posted` label.
fn normalize_date(text: &str) -> String {
    clean(&clean(text).replace("Posted", ""))
}
