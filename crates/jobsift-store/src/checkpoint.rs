//! Per-query resume checkpoints.
//!
//! The pagination position is an explicit, inspectable contract: a small
//! JSON state file per query, written after every completed page and read
//! back at pipeline start. Deleting the file restarts the query from the
//! beginning (and duplicates any rows already in the store).

use crate::error::Result;
use jobsift_core::CityQuery;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resumption position within one query's result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeCheckpoint {
    /// Result offset of the next page request
    pub job_offset: u32,
    /// Pages already completed
    pub pages_scraped: u32,
}

/// Persistence for resume checkpoints.
pub trait CheckpointStore {
    /// Load the checkpoint for a query; zero position when none exists.
    fn load(&self, query: &CityQuery) -> Result<ResumeCheckpoint>;

    /// Persist the checkpoint for a query.
    fn save(&self, query: &CityQuery, checkpoint: ResumeCheckpoint) -> Result<()>;
}

/// File-backed checkpoint store, one JSON file per query.
pub struct FileCheckpoints {
    dir: PathBuf,
}

impl FileCheckpoints {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn checkpoint_path(&self, query: &CityQuery) -> PathBuf {
        self.dir.join(format!("{}.checkpoint.json", query.as_str()))
    }
}

impl CheckpointStore for FileCheckpoints {
    fn load(&self, query: &CityQuery) -> Result<ResumeCheckpoint> {
        let path = self.checkpoint_path(query);
        if !path.exists() {
            return Ok(ResumeCheckpoint::default());
        }
        read_checkpoint(&path)
    }

    fn save(&self, query: &CityQuery, checkpoint: ResumeCheckpoint) -> Result<()> {
        let path = self.checkpoint_path(query);
        let contents = serde_json::to_string_pretty(&checkpoint)?;
        std::fs::write(&path, contents)?;
        tracing::debug!(
            "Checkpoint for {} saved at offset {}",
            query,
            checkpoint.job_offset
        );
        Ok(())
    }
}

fn read_checkpoint(path: &Path) -> Result<ResumeCheckpoint> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
