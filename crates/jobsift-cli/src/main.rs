//! Jobsift application shell.
//!
//! Thin binary that wires configuration, the query source, and one browser
//! session per query into the extraction pipeline. Core logic lives in the
//! `crates/` libraries.

use jobsift_browser::{BrowserSession, SessionIdentity};
use jobsift_core::{AppConfig, CityQuery, JobsiftError, PaginationState};
use jobsift_scraper::{PageNavigator, Timing};
use jobsift_store::{load_cities, CheckpointStore, CsvSink, FileCheckpoints};
use std::path::Path;
use tracing::{error, info, warn};

const BANNER: &str = r"
    _       _         _  __ _
   (_) ___ | |__  ___(_)/ _| |_
   | |/ _ \| '_ \/ __| | |_| __|
   | | (_) | |_) \__ \ |  _| |_
  _/ |\___/|_.__/|___/_|_|  \__|
 |__/
";

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,jobsift=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> jobsift_core::Result<()> {
    println!("{BANNER}");
    init_tracing();

    info!("Starting Jobsift v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_init()?;
    info!(
        "Thread pool size {} configured; running a single session per query",
        config.scraping.threads_count
    );

    let cities = load_cities(&config.resources.cities_file)
        .map_err(|e| JobsiftError::Store(e.to_string()))?;
    info!("Loaded {} queries", cities.len());

    let data_dir = AppConfig::data_dir()?;
    let output_dir = config
        .resources
        .output_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("stores"));
    let checkpoints = FileCheckpoints::new(data_dir.join("checkpoints"))
        .map_err(|e| JobsiftError::Store(e.to_string()))?;

    for city in &cities {
        info!("City: {}", city);
        if let Err(e) = run_query(&config, city, &output_dir, &checkpoints).await {
            // A structural page failure aborts the query, never the run.
            error!("Query {} aborted: {}", city, e);
        }
    }

    info!("All queries processed");
    Ok(())
}

/// Drive one query to completion with its own browser session, store, and
/// checkpoint.
async fn run_query(
    config: &AppConfig,
    query: &CityQuery,
    output_dir: &Path,
    checkpoints: &FileCheckpoints,
) -> jobsift_core::Result<()> {
    let identity = SessionIdentity::from_files(
        &config.resources.user_agents_file,
        &config.resources.proxies_file,
        config.browser.use_proxy,
    )
    .map_err(|e| JobsiftError::Browser(e.to_string()))?;

    let session = BrowserSession::launch(identity, config.browser.headless)
        .await
        .map_err(|e| JobsiftError::Browser(e.to_string()))?;

    let result = scrape_with_session(config, query, output_dir, checkpoints, &session).await;

    // Browser cleanup must not abort the overall run.
    info!("Closing browser");
    if let Err(e) = session.shutdown().await {
        warn!("Issue while closing browser: {}", e);
    }

    result
}

async fn scrape_with_session(
    config: &AppConfig,
    query: &CityQuery,
    output_dir: &Path,
    checkpoints: &FileCheckpoints,
    session: &BrowserSession,
) -> jobsift_core::Result<()> {
    let driver = session
        .new_driver()
        .await
        .map_err(|e| JobsiftError::Browser(e.to_string()))?;

    let checkpoint = checkpoints
        .load(query)
        .map_err(|e| JobsiftError::Store(e.to_string()))?;
    let mut state = PaginationState::resume_at(checkpoint.job_offset, checkpoint.pages_scraped);
    if checkpoint.job_offset > 0 {
        info!(
            "Resuming {} at offset {} (page {})",
            query, checkpoint.job_offset, checkpoint.pages_scraped
        );
    }

    let mut sink = CsvSink::new(output_dir).map_err(|e| JobsiftError::Store(e.to_string()))?;

    let timing = Timing::default();
    let navigator = PageNavigator::new(
        &driver,
        &timing,
        &config.search.base_url,
        &config.search.query_term,
    );

    navigator
        .run(query, &mut state, &mut sink, checkpoints)
        .await
        .map_err(|e| JobsiftError::Scrape(e.to_string()))
}
