// src/pipeline/pipeline.rs

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, CrawlReport, PropertyLookup};
use crate::queue::WorkQueue;
use crate::services::{ListingPageFetcher, PropertyDetailFetcher};
use crate::storage::RecordStore;
use crate::utils::PageSource;

use super::consume::{ConsumeOutcome, QueueConsumer};
use super::crawl::PaginationCrawler;
use super::fanout::FanoutPublisher;

/// All pipeline components wired to one set of backends.
pub struct Pipeline {
    crawler: PaginationCrawler,
    publisher: FanoutPublisher,
    details: Arc<PropertyDetailFetcher>,
    consumer: QueueConsumer,
}

impl Pipeline {
    pub fn new(
        config: Arc<Config>,
        source: Arc<dyn PageSource>,
        store: Arc<dyn RecordStore>,
        queue: Arc<dyn WorkQueue>,
    ) -> Self {
        let listings = ListingPageFetcher::new(Arc::clone(&config), Arc::clone(&source));
        let details = Arc::new(PropertyDetailFetcher::new(
            Arc::clone(&config),
            source,
            store,
        ));

        Self {
            crawler: PaginationCrawler::new(listings),
            publisher: FanoutPublisher::new(queue),
            consumer: QueueConsumer::new(Arc::clone(&details), config.queue.failure_policy),
            details,
        }
    }

    /// Crawl `pages` index pages and fan every id out to the queue.
    pub async fn crawl(&self, pages: usize) -> Result<CrawlReport> {
        let report = self.crawler.crawl_and_publish(pages, &self.publisher).await?;
        log::info!(
            "Crawl finished: {} pages, {} ids queued",
            report.page_count(),
            report.id_count()
        );
        Ok(report)
    }

    /// Direct lookup of a single property, bypassing the queue.
    pub async fn lookup(&self, id: u64) -> Result<PropertyLookup> {
        self.details.fetch(id).await
    }

    /// Process a batch of queue message bodies.
    pub async fn consume<S: AsRef<str>>(&self, bodies: &[S]) -> Result<Vec<ConsumeOutcome>> {
        self.consumer.consume(bodies).await
    }
}
