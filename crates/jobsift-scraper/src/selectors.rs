//! Selectors for the rendered search-results interface.
//!
//! These address the remote site's markup as observed; when the site ships
//! new class names the constants here are the only place to update.

/// Container holding the result cards of one page.
pub const RESULTS_LIST: &str = r#"[class="jobsearch-ResultsList css-0"]"#;

/// One posting's summary card.
pub const JOB_CARD: &str = r#"[class="job_seen_beacon"]"#;

/// Nested card element; fallback click target when the card root ignores
/// pointer events.
pub const JOB_CARD_INNER: &str = r#"[class="job_seen_beacon"]"#;

/// Title link of a card; also carries the listing URL in its href.
pub const JOB_TITLE_LINK: &str = r#"[class="jcs-JobTitle css-jspxzf eu4oa1w0"]"#;

/// Salary snippet, when the posting lists one.
pub const SALARY_SNIPPET: &str = r#"[class="metadata salary-snippet-container"]"#;

/// Company location line.
pub const COMPANY_LOCATION: &str = r#"[class="companyLocation"]"#;

/// Generic metadata block; first use is the employment type.
pub const METADATA: &str = r#"[class="metadata"]"#;

/// Relative posting date.
pub const DATE_POSTED: &str = r#"[class="date"]"#;

/// Company name inside a card.
pub const COMPANY_NAME: &str = r#"[class="companyName"]"#;

/// Primary total-count indicator.
pub const COUNT_PRIMARY: &str = r#"[class="jobsearch-JobCountAndSortPane-jobCount"]"#;

/// Legacy total-count indicator, still served on some result variants.
pub const COUNT_SECONDARY: &str = r#"[id="searchCountPages"]"#;

/// Embedded detail frame some postings render their extended detail in.
pub const DETAIL_FRAME: &str = r#"[id="vjs-container-iframe"]"#;

/// Ratings count inside the detail context.
pub const RATINGS_COUNT: &str = r#"[class="icl-Ratings-count"]"#;
