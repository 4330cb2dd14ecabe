//! Pipeline tests against a scripted driver.
//!
//! The mock resolves every wait immediately (presence check, no polling),
//! so the production timeouts cost nothing here.

use jobsift_browser::{BrowserError, PageDriver};
use jobsift_core::{CityQuery, JobPosting, PaginationState};
use jobsift_scraper::selectors;
use jobsift_scraper::url::search_url;
use jobsift_scraper::{ListingEnumerator, PageNavigator, ScrapeError, Timing};
use jobsift_store::{CheckpointStore, RecordSink, ResumeCheckpoint};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

const BASE_URL: &str = "https://ca.indeed.com/jobs";

#[derive(Debug, Default, Clone)]
struct MockElement {
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<String, String>,
}

impl MockElement {
    fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    fn with_child(mut self, selector: &str, text: &str) -> Self {
        self.children.insert(selector.to_string(), text.to_string());
        self
    }
}

#[derive(Debug, Default, Clone)]
struct PageModel {
    elements: HashMap<String, Vec<MockElement>>,
    frame: Option<HashMap<String, Vec<MockElement>>>,
}

impl PageModel {
    fn with_results(mut self) -> Self {
        self.push(selectors::RESULTS_LIST, MockElement::text(""));
        self
    }

    fn with_count_primary(mut self, text: &str) -> Self {
        self.push(selectors::COUNT_PRIMARY, MockElement::text(text));
        self
    }

    fn with_count_secondary(mut self, text: &str) -> Self {
        self.push(selectors::COUNT_SECONDARY, MockElement::text(text));
        self
    }

    fn with_detail_frame(mut self, elements: HashMap<String, Vec<MockElement>>) -> Self {
        self.push(selectors::DETAIL_FRAME, MockElement::text(""));
        self.frame = Some(elements);
        self
    }

    fn push(&mut self, selector: &str, element: MockElement) {
        self.elements
            .entry(selector.to_string())
            .or_default()
            .push(element);
    }
}

#[derive(Default)]
struct MockDriver {
    pages: HashMap<String, PageModel>,
    current: Mutex<PageModel>,
    in_frame: Mutex<bool>,
    navigations: Mutex<Vec<String>>,
    frame_enters: Mutex<u32>,
    frame_exits: Mutex<u32>,
}

impl MockDriver {
    fn with_pages(pages: HashMap<String, PageModel>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    fn single_page(page: PageModel) -> Self {
        let driver = Self::default();
        *driver.current.lock().unwrap() = page;
        driver
    }

    fn find(&self, selector: &str) -> Vec<MockElement> {
        let current = self.current.lock().unwrap();
        if *self.in_frame.lock().unwrap() {
            current
                .frame
                .as_ref()
                .and_then(|f| f.get(selector))
                .cloned()
                .unwrap_or_default()
        } else {
            current.elements.get(selector).cloned().unwrap_or_default()
        }
    }

    fn element_at(&self, selector: &str, index: usize) -> Result<MockElement, BrowserError> {
        self.find(selector)
            .get(index)
            .cloned()
            .ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))
    }
}

#[async_trait::async_trait]
impl PageDriver for MockDriver {
    async fn navigate(&self, url: &str) -> jobsift_browser::Result<()> {
        self.navigations.lock().unwrap().push(url.to_string());
        *self.current.lock().unwrap() = self.pages.get(url).cloned().unwrap_or_default();
        *self.in_frame.lock().unwrap() = false;
        Ok(())
    }

    async fn wait_until_visible(
        &self,
        selector: &str,
        _timeout: Duration,
        _poll: Duration,
    ) -> jobsift_browser::Result<()> {
        if self.find(selector).is_empty() {
            Err(BrowserError::Timeout(selector.to_string()))
        } else {
            Ok(())
        }
    }

    async fn element_count(&self, selector: &str) -> jobsift_browser::Result<usize> {
        Ok(self.find(selector).len())
    }

    async fn text_at(&self, selector: &str, index: usize) -> jobsift_browser::Result<String> {
        Ok(self.element_at(selector, index)?.text)
    }

    async fn text_within(
        &self,
        selector: &str,
        index: usize,
        child: &str,
    ) -> jobsift_browser::Result<String> {
        self.element_at(selector, index)?
            .children
            .get(child)
            .cloned()
            .ok_or_else(|| BrowserError::SelectorNotFound(child.to_string()))
    }

    async fn attribute_at(
        &self,
        selector: &str,
        index: usize,
        name: &str,
    ) -> jobsift_browser::Result<String> {
        self.element_at(selector, index)?
            .attrs
            .get(name)
            .cloned()
            .ok_or_else(|| BrowserError::SelectorNotFound(selector.to_string()))
    }

    async fn hover_and_click(&self, selector: &str, index: usize) -> jobsift_browser::Result<()> {
        self.element_at(selector, index).map(|_| ())
    }

    async fn hover_and_click_within(
        &self,
        selector: &str,
        index: usize,
        child: &str,
    ) -> jobsift_browser::Result<()> {
        let element = self.element_at(selector, index)?;
        if element.children.contains_key(child) {
            Ok(())
        } else {
            Err(BrowserError::SelectorNotFound(child.to_string()))
        }
    }

    async fn scroll_into_view_at(
        &self,
        selector: &str,
        index: usize,
    ) -> jobsift_browser::Result<()> {
        self.element_at(selector, index).map(|_| ())
    }

    async fn enter_frame(&self, selector: &str) -> jobsift_browser::Result<()> {
        if self.current.lock().unwrap().frame.is_some() {
            *self.in_frame.lock().unwrap() = true;
            *self.frame_enters.lock().unwrap() += 1;
            Ok(())
        } else {
            Err(BrowserError::SelectorNotFound(selector.to_string()))
        }
    }

    async fn exit_frame(&self) -> jobsift_browser::Result<()> {
        *self.in_frame.lock().unwrap() = false;
        *self.frame_exits.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Default)]
struct VecSink {
    postings: Vec<JobPosting>,
}

impl RecordSink for VecSink {
    fn append(&mut self, _query: &CityQuery, posting: &JobPosting) -> jobsift_store::Result<()> {
        self.postings.push(posting.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MemoryCheckpoints {
    saved: Mutex<Vec<ResumeCheckpoint>>,
}

impl CheckpointStore for MemoryCheckpoints {
    fn load(&self, _query: &CityQuery) -> jobsift_store::Result<ResumeCheckpoint> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .last()
            .copied()
            .unwrap_or_default())
    }

    fn save(
        &self,
        _query: &CityQuery,
        checkpoint: ResumeCheckpoint,
    ) -> jobsift_store::Result<()> {
        self.saved.lock().unwrap().push(checkpoint);
        Ok(())
    }
}

fn query() -> CityQuery {
    CityQuery::new("Toronto").expect("valid city")
}

fn page_url(offset: u32) -> String {
    search_url(BASE_URL, "", &query(), offset).expect("build url")
}

/// A fully-populated card and its expected field texts.
fn populated_card(page: &mut PageModel, n: usize) {
    page.push(
        selectors::JOB_CARD,
        MockElement::text("").with_child(selectors::COMPANY_NAME, &format!("Company {n}")),
    );
    page.push(
        selectors::JOB_TITLE_LINK,
        MockElement::text(&format!("Job {n}")).with_attr("href", &format!("https://jobs.example/{n}")),
    );
    page.push(
        selectors::SALARY_SNIPPET,
        MockElement::text("$50,000\na year"),
    );
    page.push(selectors::COMPANY_LOCATION, MockElement::text("Toronto, ON"));
    page.push(selectors::METADATA, MockElement::text("Job type:\nPermanent"));
    page.push(selectors::DATE_POSTED, MockElement::text("Posted\n3 days ago"));
}

#[tokio::test]
async fn all_probes_failing_yields_documented_defaults() {
    // One bare card: nothing but the card element itself renders.
    let mut page = PageModel::default().with_results();
    page.push(selectors::JOB_CARD, MockElement::text(""));

    let driver = MockDriver::single_page(page);
    let timing = Timing::immediate();
    let enumerator = ListingEnumerator::new(&driver, &timing);
    let mut sink = VecSink::default();

    let appended = enumerator
        .scrape_page(&query(), &mut sink)
        .await
        .expect("scrape page");

    assert_eq!(appended, 1);
    let posting = &sink.postings[0];
    assert_eq!(posting.job_title, "");
    assert_eq!(posting.salary, "");
    assert_eq!(posting.job_type, "Full-Time");
    assert_eq!(posting.location, "");
    assert_eq!(posting.company_name, "");
    assert_eq!(posting.date_posted, "Today");
    assert_eq!(posting.reviews, "Reviews Not Found");
    assert_eq!(posting.job_url, "");
    assert_eq!(posting.listing_url, "");
}

#[tokio::test]
async fn extracted_fields_are_normalized() {
    let mut page = PageModel::default().with_results();
    populated_card(&mut page, 1);

    let driver = MockDriver::single_page(page);
    let timing = Timing::immediate();
    let enumerator = ListingEnumerator::new(&driver, &timing);
    let mut sink = VecSink::default();

    enumerator
        .scrape_page(&query(), &mut sink)
        .await
        .expect("scrape page");

    let posting = &sink.postings[0];
    assert_eq!(posting.job_title, "Job 1");
    assert_eq!(posting.salary, "$50,000 a year");
    assert_eq!(posting.job_type, "Permanent");
    assert_eq!(posting.location, "Toronto, ON");
    assert_eq!(posting.company_name, "Company 1");
    assert_eq!(posting.date_posted, "3 days ago");
    assert_eq!(posting.listing_url, "https://jobs.example/1");
    // job_url aliases listing_url
    assert_eq!(posting.job_url, posting.listing_url);
}

#[tokio::test]
async fn missing_title_link_leaves_other_fields_intact() {
    // Scenario C: no title link anywhere, salary and location render fine.
    let mut page = PageModel::default().with_results();
    page.push(selectors::JOB_CARD, MockElement::text(""));
    page.push(
        selectors::SALARY_SNIPPET,
        MockElement::text("$30 an hour"),
    );
    page.push(selectors::COMPANY_LOCATION, MockElement::text("Halifax, NS"));

    let driver = MockDriver::single_page(page);
    let timing = Timing::immediate();
    let enumerator = ListingEnumerator::new(&driver, &timing);
    let mut sink = VecSink::default();

    enumerator
        .scrape_page(&query(), &mut sink)
        .await
        .expect("scrape page");

    let posting = &sink.postings[0];
    assert_eq!(posting.job_title, "");
    assert_eq!(posting.listing_url, "");
    assert_eq!(posting.job_url, "");
    assert_eq!(posting.salary, "$30 an hour");
    assert_eq!(posting.location, "Halifax, NS");
}

#[tokio::test]
async fn card_failures_do_not_block_later_cards() {
    // Two cards; the first has no extractable fields at all.
    let mut page = PageModel::default().with_results();
    page.push(selectors::JOB_CARD, MockElement::text(""));
    page.push(
        selectors::JOB_CARD,
        MockElement::text("").with_child(selectors::COMPANY_NAME, "Second Co"),
    );
    page.push(selectors::COMPANY_LOCATION, MockElement::text("A, ON"));
    page.push(selectors::COMPANY_LOCATION, MockElement::text("B, ON"));

    let driver = MockDriver::single_page(page);
    let timing = Timing::immediate();
    let enumerator = ListingEnumerator::new(&driver, &timing);
    let mut sink = VecSink::default();

    let appended = enumerator
        .scrape_page(&query(), &mut sink)
        .await
        .expect("scrape page");

    assert_eq!(appended, 2);
    assert_eq!(sink.postings[1].company_name, "Second Co");
    assert_eq!(sink.postings[1].location, "B, ON");
}

#[tokio::test]
async fn detail_context_enter_exit_always_paired() {
    let mut frame_content = HashMap::new();
    frame_content.insert(
        selectors::RATINGS_COUNT.to_string(),
        vec![MockElement::text("123 reviews")],
    );

    let mut page = PageModel::default()
        .with_results()
        .with_detail_frame(frame_content);
    for _ in 0..3 {
        page.push(selectors::JOB_CARD, MockElement::text(""));
    }

    let driver = MockDriver::single_page(page);
    assert!(!*driver.in_frame.lock().unwrap());

    let timing = Timing::immediate();
    let enumerator = ListingEnumerator::new(&driver, &timing);
    let mut sink = VecSink::default();

    enumerator
        .scrape_page(&query(), &mut sink)
        .await
        .expect("scrape page");

    // Frame present: every card entered and exited the detail context.
    assert_eq!(*driver.frame_enters.lock().unwrap(), 3);
    assert_eq!(*driver.frame_exits.lock().unwrap(), 3);
    // Outer context active after the last card.
    assert!(!*driver.in_frame.lock().unwrap());
    for posting in &sink.postings {
        assert_eq!(posting.reviews, "123 reviews");
    }
}

#[tokio::test]
async fn exit_still_called_when_frame_absent() {
    let mut page = PageModel::default().with_results();
    page.push(selectors::JOB_CARD, MockElement::text(""));
    page.push(selectors::JOB_CARD, MockElement::text(""));

    let driver = MockDriver::single_page(page);
    let timing = Timing::immediate();
    let enumerator = ListingEnumerator::new(&driver, &timing);
    let mut sink = VecSink::default();

    enumerator
        .scrape_page(&query(), &mut sink)
        .await
        .expect("scrape page");

    // No frame: zero entries, but the unconditional exit still ran per card.
    assert_eq!(*driver.frame_enters.lock().unwrap(), 0);
    assert_eq!(*driver.frame_exits.lock().unwrap(), 2);
    assert!(!*driver.in_frame.lock().unwrap());
    for posting in &sink.postings {
        assert_eq!(posting.reviews, "Reviews Not Found");
    }
}

#[tokio::test]
async fn navigator_walks_pages_and_advances_checkpoint() {
    // 29 jobs -> 3 pages of results, one card each.
    let mut pages = HashMap::new();
    for offset in [0u32, 10, 20] {
        let mut page = PageModel::default().with_results();
        if offset == 0 {
            page = page.with_count_primary("29 jobs Page 1 of");
        }
        populated_card(&mut page, offset as usize);
        pages.insert(page_url(offset), page);
    }

    let driver = MockDriver::with_pages(pages);
    let timing = Timing::immediate();
    let navigator = PageNavigator::new(&driver, &timing, BASE_URL, "");
    let mut sink = VecSink::default();
    let checkpoints = MemoryCheckpoints::default();
    let mut state = PaginationState::default();

    navigator
        .run(&query(), &mut state, &mut sink, &checkpoints)
        .await
        .expect("run pipeline");

    assert_eq!(state.total_jobs, 29);
    assert_eq!(state.pages_total, 3);
    assert_eq!(state.pages_scraped, 3);
    assert_eq!(state.job_offset, 30);
    assert_eq!(sink.postings.len(), 3);

    // Checkpoint advanced by exactly stride 10 / page 1 after every page.
    let saved = checkpoints.saved.lock().unwrap();
    let offsets: Vec<u32> = saved.iter().map(|c| c.job_offset).collect();
    let scraped: Vec<u32> = saved.iter().map(|c| c.pages_scraped).collect();
    assert_eq!(offsets, vec![10, 20, 30]);
    assert_eq!(scraped, vec![1, 2, 3]);
}

#[tokio::test]
async fn navigator_defaults_to_25_pages_without_count_indicator() {
    // Scenario B: neither count indicator renders; every page is empty
    // results, and the loop still terminates at the default boundary.
    let mut pages = HashMap::new();
    for page_index in 0..25u32 {
        let page = PageModel::default().with_results();
        pages.insert(page_url(page_index * 10), page);
    }

    let driver = MockDriver::with_pages(pages);
    let timing = Timing::immediate();
    let navigator = PageNavigator::new(&driver, &timing, BASE_URL, "");
    let mut sink = VecSink::default();
    let checkpoints = MemoryCheckpoints::default();
    let mut state = PaginationState::default();

    navigator
        .run(&query(), &mut state, &mut sink, &checkpoints)
        .await
        .expect("run pipeline");

    assert_eq!(state.total_jobs, 0);
    assert_eq!(state.pages_total, 25);
    assert_eq!(state.pages_scraped, 25);
    assert!(sink.postings.is_empty());
    // Discovery navigation plus one per page.
    assert_eq!(driver.navigations.lock().unwrap().len(), 26);
}

#[tokio::test]
async fn navigator_uses_secondary_count_indicator() {
    let mut pages = HashMap::new();
    let mut first = PageModel::default()
        .with_results()
        .with_count_secondary("Page 1 of 11 jobs");
    populated_card(&mut first, 0);
    pages.insert(page_url(0), first);

    let driver = MockDriver::with_pages(pages);
    let timing = Timing::immediate();
    let navigator = PageNavigator::new(&driver, &timing, BASE_URL, "");
    let mut sink = VecSink::default();
    let checkpoints = MemoryCheckpoints::default();
    let mut state = PaginationState::default();

    navigator
        .run(&query(), &mut state, &mut sink, &checkpoints)
        .await
        .expect("run pipeline");

    // The page-counter prose is stripped; the job count wins.
    assert_eq!(state.total_jobs, 11);
    // round(11 / 10) = 1 page.
    assert_eq!(state.pages_total, 1);
    assert_eq!(sink.postings.len(), 1);
}

#[tokio::test]
async fn navigator_resumes_from_checkpoint() {
    let mut pages = HashMap::new();
    for offset in [10u32, 20] {
        let mut page = PageModel::default().with_results();
        if offset == 10 {
            page = page.with_count_primary("29 jobs");
        }
        populated_card(&mut page, offset as usize);
        pages.insert(page_url(offset), page);
    }

    let driver = MockDriver::with_pages(pages);
    let timing = Timing::immediate();
    let navigator = PageNavigator::new(&driver, &timing, BASE_URL, "");
    let mut sink = VecSink::default();
    let checkpoints = MemoryCheckpoints::default();

    // Resume one page in: offset 10, one page already scraped.
    let mut state = PaginationState::resume_at(10, 1);

    navigator
        .run(&query(), &mut state, &mut sink, &checkpoints)
        .await
        .expect("run pipeline");

    assert_eq!(state.pages_scraped, 3);
    assert_eq!(state.job_offset, 30);
    // Only the two remaining pages were scraped.
    assert_eq!(sink.postings.len(), 2);
    let navigations = driver.navigations.lock().unwrap();
    assert!(navigations.iter().all(|url| !url.ends_with("start=0")));
}

#[tokio::test]
async fn missing_results_container_is_fatal() {
    // No pages seeded: the results container never appears.
    let driver = MockDriver::default();
    let timing = Timing::immediate();
    let navigator = PageNavigator::new(&driver, &timing, BASE_URL, "");
    let mut sink = VecSink::default();
    let checkpoints = MemoryCheckpoints::default();
    let mut state = PaginationState::default();

    let result = navigator
        .run(&query(), &mut state, &mut sink, &checkpoints)
        .await;

    assert!(matches!(
        result,
        Err(ScrapeError::ResultsNotVisible { .. })
    ));
    assert!(sink.postings.is_empty());
}
