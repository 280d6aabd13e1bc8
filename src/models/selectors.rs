// src/models/selectors.rs

//! CSS selectors for scraping listing and detail pages.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// CSS selectors for the listing index and property detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSelectors {
    /// Anchor for each listing on an index page
    #[serde(default = "defaults::listing_link")]
    pub listing_link: String,

    /// Anchor of the "next page" control on an index page
    #[serde(default = "defaults::next_page")]
    pub next_page: String,

    /// Each feature item on a detail page (label in `span`, value in `b`)
    #[serde(default = "defaults::feature_item")]
    pub feature_item: String,

    /// Location block (address in `b`, "neighborhood, city" in `span`)
    #[serde(default = "defaults::location")]
    pub location: String,

    /// Transaction type block
    #[serde(default = "defaults::operation")]
    pub operation: String,

    /// Price element
    #[serde(default = "defaults::price")]
    pub price: String,

    /// Description fragments
    #[serde(default = "defaults::description")]
    pub description: String,

    /// HTML attribute name for extracting links (usually "href")
    #[serde(default = "defaults::attr_name")]
    pub attr_name: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            listing_link: defaults::listing_link(),
            next_page: defaults::next_page(),
            feature_item: defaults::feature_item(),
            location: defaults::location(),
            operation: defaults::operation(),
            price: defaults::price(),
            description: defaults::description(),
            attr_name: defaults::attr_name(),
        }
    }
}

impl PageSelectors {
    /// Check that every selector parses.
    pub fn validate(&self) -> Result<()> {
        for selector in [
            &self.listing_link,
            &self.next_page,
            &self.feature_item,
            &self.location,
            &self.operation,
            &self.price,
            &self.description,
        ] {
            parse_selector(selector)?;
        }
        if self.attr_name.trim().is_empty() {
            return Err(AppError::validation("selectors.attr_name is empty"));
        }
        Ok(())
    }
}

/// Parse a CSS selector, mapping failures into `AppError::Selector`.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

mod defaults {
    pub fn listing_link() -> String {
        "a.dl-aviso-a".into()
    }
    pub fn next_page() -> String {
        "li.pagination-action-next a".into()
    }
    pub fn feature_item() -> String {
        "li.icon-feature".into()
    }
    pub fn location() -> String {
        "h2.title-location".into()
    }
    pub fn operation() -> String {
        "div.price-operation".into()
    }
    pub fn price() -> String {
        "div.price-items span".into()
    }
    pub fn description() -> String {
        "div#verDatosDescripcion".into()
    }
    pub fn attr_name() -> String {
        "href".into()
    }
}
