// src/config.rs

//! Configuration loading utilities.
//!
//! Local runs read a TOML file; the Lambda environment starts from defaults
//! and applies environment variable overrides.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Load configuration from a TOML file, falling back to defaults, and validate it.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration in {path:?}: {e}")))?;
    Ok(config)
}

/// Load configuration for the Lambda environment.
pub fn load_lambda_config() -> Result<Config> {
    let mut config = match std::env::var("CONFIG_PATH") {
        Ok(path) => Config::load_or_default(path),
        Err(_) => Config::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Override configuration values from environment-style lookups.
///
/// Recognized keys: `BASE_URL`, `CRAWL_TIMEOUT_SECS`, `STRICT_PAGINATION`,
/// `S3_BUCKET`, `S3_PREFIX`, `QUEUE_NAME`, `FAILURE_POLICY`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup("BASE_URL") {
        config.crawler.base_url = base_url;
    }

    if let Some(timeout) = lookup("CRAWL_TIMEOUT_SECS") {
        config.crawler.timeout_secs = timeout
            .parse()
            .map_err(|_| AppError::config(format!("CRAWL_TIMEOUT_SECS is not a number: {timeout}")))?;
    }

    if let Some(strict) = lookup("STRICT_PAGINATION") {
        config.crawler.strict_pagination = matches!(
            strict.trim().to_lowercase().as_str(),
            "1" | "true" | "yes"
        );
    }

    if let Some(bucket) = lookup("S3_BUCKET") {
        config.storage.bucket = bucket;
    }

    if let Some(prefix) = lookup("S3_PREFIX") {
        config.storage.prefix = prefix;
    }

    if let Some(queue_name) = lookup("QUEUE_NAME") {
        config.queue.queue_name = queue_name;
    }

    if let Some(policy) = lookup("FAILURE_POLICY") {
        config.queue.failure_policy = policy.parse()?;
    }

    Ok(())
}
