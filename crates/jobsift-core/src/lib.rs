//! Jobsift Core - Foundation crate for the Jobsift scraper.
//!
//! This crate provides the shared types, error handling, and configuration
//! management that all other Jobsift crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared value types (`CityQuery`, `JobPosting`, `PaginationState`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, ResourceConfig, ScrapingConfig, SearchConfig};
pub use error::{ConfigError, ConfigResult, JobsiftError, Result};
pub use types::{CityQuery, JobPosting, PaginationState, PAGE_STRIDE};
