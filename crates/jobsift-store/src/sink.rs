//! Append-only record sink.
//!
//! One CSV store per query, named after the city. The header row is written
//! exactly once, when the store is created; every later append adds a single
//! record row. Records appear in extraction order and are never deduplicated:
//! re-running the pipeline over an already-written offset range produces
//! duplicate rows.

use crate::csv::write_row;
use crate::error::Result;
use jobsift_core::{CityQuery, JobPosting};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Destination for normalized postings.
pub trait RecordSink {
    /// Append one posting to the query's store.
    fn append(&mut self, query: &CityQuery, posting: &JobPosting) -> Result<()>;
}

/// File-backed sink writing one CSV store per query.
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    /// Create a sink rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the store file for a query.
    #[must_use]
    pub fn store_path(&self, query: &CityQuery) -> PathBuf {
        self.dir.join(format!("{}.csv", query.as_str()))
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, query: &CityQuery, posting: &JobPosting) -> Result<()> {
        let path = self.store_path(query);
        append_record(&path, posting)?;
        tracing::debug!("Record appended to {}", path.display());
        Ok(())
    }
}

fn append_record(path: &Path, posting: &JobPosting) -> Result<()> {
    let is_new = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    if is_new {
        let header: Vec<String> = JobPosting::HEADERS
            .iter()
            .map(ToString::to_string)
            .collect();
        write_row(&mut file, &header)?;
    }
    write_row(&mut file, &posting.to_row())?;
    Ok(())
}
