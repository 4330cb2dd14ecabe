//! Durable persistence for Jobsift.
//!
//! One delimited tabular store per query, append-only with a header row;
//! the ordered query source; and the per-query resume checkpoint that
//! replaces hardcoded resumption constants.

pub mod checkpoint;
pub mod csv;
pub mod error;
pub mod queries;
pub mod sink;

pub use checkpoint::{CheckpointStore, FileCheckpoints, ResumeCheckpoint};
pub use error::{Result, StoreError};
pub use queries::load_cities;
pub use sink::{CsvSink, RecordSink};
