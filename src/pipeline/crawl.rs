// src/pipeline/crawl.rs

//! Pagination-driven listing crawl.

use crate::error::{AppError, Result};
use crate::models::CrawlReport;
use crate::pipeline::FanoutPublisher;
use crate::services::ListingPageFetcher;

/// Walks the listing index page by page, following continuations.
///
/// Pages are fetched strictly in order because each continuation is only
/// known once the previous page has been parsed.
pub struct PaginationCrawler {
    fetcher: ListingPageFetcher,
}

impl PaginationCrawler {
    pub fn new(fetcher: ListingPageFetcher) -> Self {
        Self { fetcher }
    }

    /// Visit up to `pages` pages and collect their ids and continuations.
    pub async fn crawl(&self, pages: usize) -> Result<CrawlReport> {
        self.run(pages, None).await
    }

    /// Like `crawl`, but hands each page's ids to the publisher as soon as the
    /// page is parsed. Pages published before a failure stay published.
    pub async fn crawl_and_publish(
        &self,
        pages: usize,
        publisher: &FanoutPublisher,
    ) -> Result<CrawlReport> {
        self.run(pages, Some(publisher)).await
    }

    async fn run(&self, pages: usize, publisher: Option<&FanoutPublisher>) -> Result<CrawlReport> {
        if pages == 0 {
            return Err(AppError::validation("pages must be >= 1"));
        }

        let mut report = CrawlReport::default();
        let mut continuation: Option<String> = None;

        for n in 1..=pages {
            let page = self.fetcher.fetch(continuation.as_deref()).await?;
            log::info!(
                "Page {}/{}: {} listings on {}",
                n,
                pages,
                page.ids.len(),
                page.url
            );

            if let Some(publisher) = publisher {
                publisher.publish(&page.ids).await?;
            }

            continuation = page.paginator.clone();
            report.record(page);

            if continuation.is_none() {
                if n < pages {
                    log::info!("Reached the last page after {} of {} pages", n, pages);
                }
                break;
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::Config;
    use crate::queue::MemoryQueue;
    use crate::test_support::{ScriptedPages, listing_html};

    const FIRST: &str = "https://www.imoveiscuritiba.com.br/apartamentos-curitiba-pr.html";

    fn crawler(config: Config, pages: Arc<ScriptedPages>) -> PaginationCrawler {
        PaginationCrawler::new(ListingPageFetcher::new(Arc::new(config), pages))
    }

    fn three_pages() -> ScriptedPages {
        ScriptedPages::new()
            .with_page(FIRST, listing_html(&[1, 2], Some("/p2.html")))
            .with_page(
                "https://www.imoveiscuritiba.com.br/p2.html",
                listing_html(&[2, 3], Some("/p3.html")),
            )
            .with_page(
                "https://www.imoveiscuritiba.com.br/p3.html",
                listing_html(&[4], Some("/p4.html")),
            )
    }

    #[tokio::test]
    async fn test_single_page_with_fanout() {
        let pages = Arc::new(
            ScriptedPages::new().with_page(FIRST, listing_html(&[101, 102], Some("page2"))),
        );
        let queue = Arc::new(MemoryQueue::new());
        let publisher = FanoutPublisher::new(queue.clone());

        let report = crawler(Config::default(), pages.clone())
            .crawl_and_publish(1, &publisher)
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ FIRST: { "ids": [101, 102], "paginator": "page2" } })
        );
        assert_eq!(queue.drain().unwrap(), vec![r#"{"id":101}"#, r#"{"id":102}"#]);
        assert_eq!(pages.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_exactly_k_fetches() {
        let pages = Arc::new(three_pages());
        let report = crawler(Config::default(), pages.clone()).crawl(3).await.unwrap();

        assert_eq!(pages.fetch_count(), 3);
        assert_eq!(report.page_count(), 3);
        assert_eq!(
            report.pages["https://www.imoveiscuritiba.com.br/p3.html"].paginator.as_deref(),
            Some("/p4.html")
        );
    }

    #[tokio::test]
    async fn test_fanout_counts_duplicates_across_pages() {
        let queue = Arc::new(MemoryQueue::new());
        let publisher = FanoutPublisher::new(queue.clone());

        let report = crawler(Config::default(), Arc::new(three_pages()))
            .crawl_and_publish(3, &publisher)
            .await
            .unwrap();

        assert_eq!(report.id_count(), 5);
        assert_eq!(queue.len(), 5);
    }

    #[tokio::test]
    async fn test_stops_at_last_page() {
        let pages = Arc::new(
            ScriptedPages::new()
                .with_page(FIRST, listing_html(&[1], Some("/p2.html")))
                .with_page(
                    "https://www.imoveiscuritiba.com.br/p2.html",
                    listing_html(&[2], None),
                ),
        );

        let report = crawler(Config::default(), pages.clone()).crawl(5).await.unwrap();

        assert_eq!(pages.fetch_count(), 2);
        assert_eq!(report.page_count(), 2);
    }

    #[tokio::test]
    async fn test_strict_pagination_fails_on_last_page() {
        let pages = Arc::new(ScriptedPages::new().with_page(FIRST, listing_html(&[1], None)));
        let mut config = Config::default();
        config.crawler.strict_pagination = true;

        let result = crawler(config, pages).crawl(2).await;
        assert!(matches!(result, Err(AppError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_earlier_fanout() {
        let pages = Arc::new(
            ScriptedPages::new().with_page(FIRST, listing_html(&[1, 2], Some("/gone.html"))),
        );
        let queue = Arc::new(MemoryQueue::new());
        let publisher = FanoutPublisher::new(queue.clone());

        let result = crawler(Config::default(), pages)
            .crawl_and_publish(2, &publisher)
            .await;

        assert!(result.unwrap_err().is_transport());
        assert_eq!(queue.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_pages_rejected() {
        let pages = Arc::new(ScriptedPages::new());
        let result = crawler(Config::default(), pages.clone()).crawl(0).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(pages.fetch_count(), 0);
    }
}
