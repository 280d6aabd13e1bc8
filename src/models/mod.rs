// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod listing;
mod message;
mod property;
mod selectors;

// Re-export all public types
pub use config::{Config, CrawlerConfig, FailurePolicy, QueueConfig, StorageConfig};
pub use listing::{CrawlReport, ListingPage, PageEntry};
pub use message::{PropertyMessage, positive_id, positive_id_or_string};
pub use property::{FetchFailure, PropertyLookup, PropertyRecord, Source, SourcedProperty};
pub use selectors::{PageSelectors, parse_selector};
