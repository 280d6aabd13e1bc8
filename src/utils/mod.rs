//! Utility functions and helpers.

pub mod http;

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

pub use http::{HttpPageSource, PageSource};

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Extract the listing id from a detail link ending in `-<digits>.html`.
pub fn extract_listing_id(href: &str) -> Option<u64> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"-([0-9]+)\.html$").ok())
        .as_ref()?;

    pattern
        .captures(href)
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
}
