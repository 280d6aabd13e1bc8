//! Service layer for the crawler application.
//!
//! This module contains the page-level logic for:
//! - Listing index pages (`ListingPageFetcher`)
//! - Cache-aside property lookups (`PropertyDetailFetcher`)

mod listings;
mod properties;

pub use listings::{ListingPageFetcher, parse_listing_page};
pub use properties::{PropertyDetailFetcher, parse_property};
