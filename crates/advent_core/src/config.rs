//! Runtime configuration.
//!
//! # Precedence
//!
//! 1. Explicit overrides (CLI flags)
//! 2. Environment variables (`ADVENT_*`)
//! 3. Built-in defaults
//!
//! Blank environment values count as unset.

use crate::feed::source::{FeedSource, FileFeedSource, HttpFeedSource};
use crate::feed::FeedLoadError;
use crate::logging::default_log_level;
use std::env;
use std::path::PathBuf;

/// Denominator of the progress line; independent of the feed length.
pub const TOTAL_DAYS: u32 = 24;
/// Fixed path of the content document under the site root.
pub const FEED_PATH: &str = "/advent-data.json";
pub const DEFAULT_SITE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_DB_FILE: &str = "advent.sqlite3";

pub const ENV_FEED_URL: &str = "ADVENT_FEED_URL";
pub const ENV_FEED_FILE: &str = "ADVENT_FEED_FILE";
pub const ENV_DB_PATH: &str = "ADVENT_DB_PATH";
pub const ENV_LOG_DIR: &str = "ADVENT_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "ADVENT_LOG_LEVEL";

/// Where the content feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Url(String),
    File(PathBuf),
}

/// Effective configuration for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdventConfig {
    pub feed: FeedLocation,
    pub db_path: PathBuf,
    /// Logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

/// Values supplied explicitly by the caller; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub feed_url: Option<String>,
    pub feed_file: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Default for AdventConfig {
    fn default() -> Self {
        Self {
            feed: FeedLocation::Url(format!("{DEFAULT_SITE_URL}{FEED_PATH}")),
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}

impl AdventConfig {
    /// Reads `ADVENT_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// A feed file wins over a feed URL when both are set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = read(ENV_FEED_URL) {
            config.feed = FeedLocation::Url(url);
        }
        if let Some(path) = read(ENV_FEED_FILE) {
            config.feed = FeedLocation::File(PathBuf::from(path));
        }
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(url) = overrides.feed_url {
            self.feed = FeedLocation::Url(url);
        }
        if let Some(path) = overrides.feed_file {
            self.feed = FeedLocation::File(path);
        }
        if let Some(path) = overrides.db_path {
            self.db_path = path;
        }
        if let Some(dir) = overrides.log_dir {
            self.log_dir = Some(dir);
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }

    /// Builds the feed source for the configured location.
    pub fn feed_source(&self) -> Result<Box<dyn FeedSource>, FeedLoadError> {
        let source: Box<dyn FeedSource> = match &self.feed {
            FeedLocation::Url(url) => Box::new(HttpFeedSource::new(url)?),
            FeedLocation::File(path) => Box::new(FileFeedSource::new(path.clone())),
        };
        Ok(source)
    }
}
