// src/services/properties.rs

//! Property detail fetcher.
//!
//! Cache-aside lookup of a single property: the record store is consulted
//! first, and only on a miss is the detail page fetched, parsed and stored.
//!
//! The store check and the store write are not atomic. Two concurrent lookups
//! of the same id can both miss and both fetch; the second write overwrites
//! the first with equivalent content.

use std::collections::BTreeMap;
use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{
    Config, FetchFailure, PageSelectors, PropertyLookup, PropertyRecord, Source, parse_selector,
};
use crate::storage::RecordStore;
use crate::utils::PageSource;

/// Service for cache-aside property detail lookups.
pub struct PropertyDetailFetcher {
    config: Arc<Config>,
    source: Arc<dyn PageSource>,
    store: Arc<dyn RecordStore>,
}

impl PropertyDetailFetcher {
    /// Create a new fetcher over the given page source and record store.
    pub fn new(
        config: Arc<Config>,
        source: Arc<dyn PageSource>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            config,
            source,
            store,
        }
    }

    /// Look up a property, fetching and caching it on a miss.
    ///
    /// A transport failure is returned as `PropertyLookup::Failed` and leaves
    /// the store untouched. Parse and store failures are errors, as is a
    /// zero id.
    pub async fn fetch(&self, id: u64) -> Result<PropertyLookup> {
        if id == 0 {
            return Err(AppError::validation("property id must be positive"));
        }

        if let Some(record) = self.store.get(id).await? {
            log::debug!("Cache hit for property {}", id);
            return Ok(PropertyLookup::Found(record.with_source(Source::Cache)));
        }

        let url = self.config.crawler.property_url(id);
        let html = match self.source.fetch(&url).await {
            Ok(html) => html,
            Err(e) if e.is_transport() => {
                log::warn!("Failed to fetch property {} from {}: {}", id, url, e);
                return Ok(PropertyLookup::Failed(FetchFailure::new(e.to_string())));
            }
            Err(e) => return Err(e),
        };

        let record = {
            let document = Html::parse_document(&html);
            parse_property(&document, id, &url, &self.config.selectors)?
        };

        self.store.put(&record).await?;
        log::info!("Crawled and cached property {}", id);

        Ok(PropertyLookup::Found(record.with_source(Source::Crawler)))
    }
}

/// Extract a property record from its detail page.
///
/// Every field is required; a missing element is a parse failure. The feature
/// list may be empty, the description needs at least one fragment.
pub fn parse_property(
    document: &Html,
    id: u64,
    url: &str,
    selectors: &PageSelectors,
) -> Result<PropertyRecord> {
    let span = parse_selector("span")?;
    let bold = parse_selector("b")?;

    let mut features = BTreeMap::new();
    for item in document.select(&parse_selector(&selectors.feature_item)?) {
        let label = child_text(item, &span, "feature label", url)?;
        let value = child_text(item, &bold, "feature value", url)?;
        features.insert(label, value);
    }

    let location = first(document, &selectors.location, url)?;
    let address = child_text(location, &bold, "address", url)?;
    let (neighborhood, city) = split_locality(&child_text(location, &span, "locality", url)?)
        .ok_or_else(|| AppError::parse(url, "malformed locality in location block"))?;

    let operation = raw_text(first(document, &selectors.operation, url)?);
    let price = raw_text(first(document, &selectors.price, url)?);

    let fragments: Vec<String> = document
        .select(&parse_selector(&selectors.description)?)
        .map(raw_text)
        .collect();
    if fragments.is_empty() {
        return Err(AppError::parse(url, "missing description"));
    }

    Ok(PropertyRecord {
        id,
        url: url.to_string(),
        features,
        address,
        neighborhood,
        city,
        operation,
        price,
        description: fragments.concat(),
    })
}

/// Split "Neighborhood, City" after dropping the site's `",  "` filler.
fn split_locality(text: &str) -> Option<(String, String)> {
    let cleaned = text.replace(",  ", "");
    let mut parts = cleaned.split(',');
    let neighborhood = parts.next()?.trim();
    let city = parts.next()?.trim();
    if parts.next().is_some() || neighborhood.is_empty() || city.is_empty() {
        return None;
    }
    Some((neighborhood.to_string(), city.to_string()))
}

fn first<'a>(document: &'a Html, selector: &str, url: &str) -> Result<ElementRef<'a>> {
    document
        .select(&parse_selector(selector)?)
        .next()
        .ok_or_else(|| AppError::parse(url, format!("missing element '{selector}'")))
}

fn child_text(parent: ElementRef<'_>, selector: &Selector, what: &str, url: &str) -> Result<String> {
    parent
        .select(selector)
        .next()
        .map(|child| raw_text(child).trim().to_string())
        .ok_or_else(|| AppError::parse(url, format!("missing {what}")))
}

/// Text content exactly as it appears in the page.
fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
