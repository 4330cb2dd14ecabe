//! Configuration management for Jobsift.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Settings are bootstrapped with defaults
//! and persisted on first run.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// Loaded from `~/.config/jobsift/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search target settings
    pub search: SearchConfig,
    /// Scraping behavior settings
    pub scraping: ScrapingConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Resource file locations
    pub resources: ResourceConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration, writing the default file on first run.
    ///
    /// Subsequent runs read the persisted file back, so edits survive.
    pub fn load_or_init() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            let defaults = Self::default();
            defaults.save()?;
            tracing::info!("Wrote default settings to {}", config_path.display());
        }
        Self::load_with_env()
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `JOBSIFT_HEADLESS`: Override browser headless mode (true/false)
    /// - `JOBSIFT_THREADS`: Override the worker thread count
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("JOBSIFT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("JOBSIFT_THREADS") {
            if let Ok(threads) = val.parse() {
                config.scraping.threads_count = threads;
                tracing::debug!("Override scraping.threads_count from env: {}", threads);
            }
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/jobsift/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("io", "jobsift", "jobsift").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path (stores and checkpoints).
    ///
    /// Uses XDG base directories: `~/.local/share/jobsift`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("io", "jobsift", "jobsift").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Search target settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the job-search results endpoint
    pub base_url: String,
    /// Search term; empty means "all jobs" for the location
    pub query_term: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ca.indeed.com/jobs".to_string(),
            query_term: String::new(),
        }
    }
}

/// Scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Worker thread count. Read at startup; the active pipeline is
    /// single-threaded, so this only sizes a future worker pool.
    pub threads_count: u32,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self { threads_count: 5 }
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Route traffic through a random proxy from the proxy file
    pub use_proxy: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            use_proxy: false,
        }
    }
}

/// Resource file locations, relative to the current working directory
/// unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Tabular city list with a `City` header column
    pub cities_file: PathBuf,
    /// Line-delimited user-agent pool
    pub user_agents_file: PathBuf,
    /// Line-delimited proxy pool
    pub proxies_file: PathBuf,
    /// Directory receiving the per-query CSV stores; defaults to the
    /// XDG data dir when empty
    pub output_dir: Option<PathBuf>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            cities_file: PathBuf::from("res/cities.csv"),
            user_agents_file: PathBuf::from("res/user_agents.txt"),
            proxies_file: PathBuf::from("res/proxies.txt"),
            output_dir: None,
        }
    }
}
