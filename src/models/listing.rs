//! Listing index pages and crawl results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One parsed page of the listing index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// The page that was fetched
    pub url: String,

    /// Listing ids in page order, duplicates kept
    pub ids: Vec<u64>,

    /// Raw href of the next page control, `None` on the last page
    pub paginator: Option<String>,
}

/// What a crawl found on a single page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageEntry {
    pub ids: Vec<u64>,
    pub paginator: Option<String>,
}

/// Result of a crawl run, keyed by page URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CrawlReport {
    pub pages: BTreeMap<String, PageEntry>,
}

impl CrawlReport {
    /// Record a visited page.
    pub fn record(&mut self, page: ListingPage) {
        self.pages.insert(
            page.url,
            PageEntry {
                ids: page.ids,
                paginator: page.paginator,
            },
        );
    }

    /// Number of pages recorded.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total ids across all pages, duplicates included.
    pub fn id_count(&self) -> usize {
        self.pages.values().map(|entry| entry.ids.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_as_url_map() {
        let mut report = CrawlReport::default();
        report.record(ListingPage {
            url: "https://example.com/list.html".to_string(),
            ids: vec![101, 102],
            paginator: Some("page2".to_string()),
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "https://example.com/list.html": { "ids": [101, 102], "paginator": "page2" }
            })
        );
        assert_eq!(report.id_count(), 2);
    }
}
