// src/services/listings.rs

//! Listing index page fetcher.
//!
//! Retrieves one page of the listing index and extracts the listing ids it
//! links to plus the continuation for the next page.

use std::sync::Arc;

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, ListingPage, PageSelectors, parse_selector};
use crate::utils::{PageSource, extract_listing_id, resolve_url};

/// Service for fetching and parsing listing index pages.
pub struct ListingPageFetcher {
    config: Arc<Config>,
    source: Arc<dyn PageSource>,
}

impl ListingPageFetcher {
    /// Create a new fetcher over the given page source.
    pub fn new(config: Arc<Config>, source: Arc<dyn PageSource>) -> Self {
        Self { config, source }
    }

    /// Absolute URL for a continuation, or for the first page when there is none.
    pub fn page_url(&self, continuation: Option<&str>) -> Result<String> {
        let base = Url::parse(&self.config.crawler.base_url)?;
        let suffix = continuation.unwrap_or(&self.config.crawler.first_page_path);
        Ok(resolve_url(&base, suffix))
    }

    /// Fetch one index page. Every call goes to the network.
    pub async fn fetch(&self, continuation: Option<&str>) -> Result<ListingPage> {
        let url = self.page_url(continuation)?;
        let html = self.source.fetch(&url).await?;

        let document = Html::parse_document(&html);
        parse_listing_page(
            &document,
            &url,
            &self.config.selectors,
            self.config.crawler.strict_pagination,
        )
    }
}

/// Extract listing ids and the next-page continuation from an index page.
///
/// A page without any listing anchors is a parse failure. A page without a
/// next-page control is the last page, unless `strict` is set, in which case
/// it is a parse failure too.
pub fn parse_listing_page(
    document: &Html,
    url: &str,
    selectors: &PageSelectors,
    strict: bool,
) -> Result<ListingPage> {
    let link_sel = parse_selector(&selectors.listing_link)?;
    let next_sel = parse_selector(&selectors.next_page)?;

    let anchors: Vec<_> = document.select(&link_sel).collect();
    if anchors.is_empty() {
        return Err(AppError::parse(url, "no listing results"));
    }

    let mut ids = Vec::with_capacity(anchors.len());
    for anchor in anchors {
        let href = anchor.value().attr(&selectors.attr_name).unwrap_or("");
        match extract_listing_id(href) {
            Some(id) => ids.push(id),
            None => log::debug!("Skipping listing link without id: {:?}", href),
        }
    }

    let paginator = document
        .select(&next_sel)
        .next()
        .and_then(|a| a.value().attr(&selectors.attr_name))
        .map(str::to_string);

    if paginator.is_none() {
        if strict {
            return Err(AppError::parse(url, "no next page control"));
        }
        log::info!("No next page control on {}; treating it as the last page", url);
    }

    Ok(ListingPage {
        url: url.to_string(),
        ids,
        paginator,
    })
}
