//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::PageSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Page scraping selectors
    #[serde(default)]
    pub selectors: PageSelectors,

    /// Record store settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Work queue settings
    #[serde(default)]
    pub queue: QueueConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.crawler.base_url)?;
        if !self.crawler.first_page_path.starts_with('/') {
            return Err(AppError::validation(
                "crawler.first_page_path must start with '/'",
            ));
        }
        if self.queue.queue_name.trim().is_empty() {
            return Err(AppError::validation("queue.queue_name is empty"));
        }
        self.selectors.validate()
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Site root every page path is resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Index page used when a crawl starts without a continuation
    #[serde(default = "defaults::first_page_path")]
    pub first_page_path: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept-Language header for HTTP requests
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Treat a missing next-page control as a parse failure instead of the last page
    #[serde(default)]
    pub strict_pagination: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            first_page_path: defaults::first_page_path(),
            user_agent: defaults::user_agent(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
            strict_pagination: false,
        }
    }
}

impl CrawlerConfig {
    /// Canonical detail page URL for a listing id.
    pub fn property_url(&self, id: u64) -> String {
        format!(
            "{}/propriedades/-{}.html",
            self.base_url.trim_end_matches('/'),
            id
        )
    }
}

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the filesystem store
    #[serde(default = "defaults::root_dir")]
    pub root_dir: PathBuf,

    /// S3 bucket for the object store
    #[serde(default = "defaults::bucket")]
    pub bucket: String,

    /// S3 key prefix for the object store
    #[serde(default = "defaults::prefix")]
    pub prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: defaults::root_dir(),
            bucket: defaults::bucket(),
            prefix: defaults::prefix(),
        }
    }
}

/// What the queue consumer does with a message whose fetch soft-failed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log and treat the message as processed
    #[default]
    Discard,
    /// Fail the batch so the host queue redelivers or dead-letters it
    Fail,
}

impl std::str::FromStr for FailurePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "fail" => Ok(Self::Fail),
            other => Err(AppError::config(format!("unknown failure policy '{other}'"))),
        }
    }
}

/// Work queue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Name of the queue ids are fanned out to
    #[serde(default = "defaults::queue_name")]
    pub queue_name: String,

    /// Handling of soft fetch failures during consumption
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            queue_name: defaults::queue_name(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Crawler defaults
    pub fn base_url() -> String {
        "https://www.imoveiscuritiba.com.br".into()
    }
    pub fn first_page_path() -> String {
        "/apartamentos-curitiba-pr.html".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/72.0.3626.121 Safari/537.36".into()
    }
    pub fn accept_language() -> String {
        "en-US,en;q=0.9,pt;q=0.8".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Storage defaults
    pub fn root_dir() -> PathBuf {
        PathBuf::from("storage")
    }
    pub fn bucket() -> String {
        "serverless-crawler-index".into()
    }
    pub fn prefix() -> String {
        "crawler".into()
    }

    // Queue defaults
    pub fn queue_name() -> String {
        "serverless_crawler_queue".into()
    }
}
