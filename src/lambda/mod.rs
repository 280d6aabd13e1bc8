// src/lambda/mod.rs

//! AWS Lambda handler for the crawler.
//!
//! One function serves all three triggers, told apart by event shape:
//! 1. SQS batch (`{"Records": [{"body": "{\"id\": 101}"}]}`) warms the store
//! 2. Lookup (`{"id": 101}`) returns the property or a failure object
//! 3. Crawl (`{"pages": 2}`, or `{}` for one page) fans ids out to the queue

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::positive_id_or_string;
use crate::pipeline::Pipeline;

/// Lambda invocation payload.
///
/// Variants are tried in order. A payload that matches none of them is
/// rejected; in particular a crawl request carries no fields besides `pages`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Invocation {
    /// Queue trigger batch
    Queue(QueueBatch),

    /// Direct property lookup
    Lookup(LookupRequest),

    /// Listing crawl
    Crawl(CrawlRequest),
}

/// Queue trigger event.
#[derive(Debug, Deserialize)]
pub struct QueueBatch {
    #[serde(rename = "Records")]
    pub records: Vec<QueueRecord>,
}

/// One record of a queue trigger batch.
#[derive(Debug, Deserialize)]
pub struct QueueRecord {
    pub body: String,
}

/// Lookup payload; the id may arrive as a path parameter string.
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    #[serde(deserialize_with = "positive_id_or_string")]
    pub id: u64,
}

/// Crawl payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlRequest {
    #[serde(default = "default_pages")]
    pub pages: usize,
}

fn default_pages() -> usize {
    1
}

/// Main Lambda handler function.
#[instrument(skip(pipeline, event))]
pub async fn handler(
    pipeline: &Pipeline,
    event: LambdaEvent<Invocation>,
) -> std::result::Result<Value, LambdaError> {
    let (invocation, context) = event.into_parts();
    info!("Handling request {}: {:?}", context.request_id, invocation);

    match dispatch(pipeline, invocation).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("Invocation failed: {}", e);
            Err(e.into())
        }
    }
}

/// Route an invocation to the matching pipeline operation.
pub async fn dispatch(pipeline: &Pipeline, invocation: Invocation) -> Result<Value> {
    match invocation {
        Invocation::Queue(batch) => {
            let bodies: Vec<&str> = batch.records.iter().map(|r| r.body.as_str()).collect();
            let outcomes = pipeline.consume(&bodies).await?;
            Ok(serde_json::to_value(outcomes)?)
        }
        Invocation::Lookup(request) => {
            Ok(serde_json::to_value(pipeline.lookup(request.id).await?)?)
        }
        Invocation::Crawl(request) => {
            Ok(serde_json::to_value(pipeline.crawl(request.pages).await?)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::Config;
    use crate::queue::MemoryQueue;
    use crate::storage::{MemoryStore, RecordStore};
    use crate::test_support::{ScriptedPages, listing_html, sample_record};

    fn parse(json: &str) -> serde_json::Result<Invocation> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_invocation_shapes() {
        let queue = parse(r#"{"Records": [{"body": "{\"id\":1}", "messageId": "m"}]}"#).unwrap();
        assert!(matches!(queue, Invocation::Queue(ref batch) if batch.records.len() == 1));

        let lookup = parse(r#"{"id": 101}"#).unwrap();
        assert!(matches!(lookup, Invocation::Lookup(LookupRequest { id: 101 })));

        let path_lookup = parse(r#"{"id": "101"}"#).unwrap();
        assert!(matches!(path_lookup, Invocation::Lookup(LookupRequest { id: 101 })));

        let crawl = parse(r#"{"pages": 3}"#).unwrap();
        assert!(matches!(crawl, Invocation::Crawl(CrawlRequest { pages: 3 })));

        let default_crawl = parse("{}").unwrap();
        assert!(matches!(default_crawl, Invocation::Crawl(CrawlRequest { pages: 1 })));
    }

    #[test]
    fn test_unrecognized_payloads_are_rejected() {
        for payload in [
            r#"{"id": "abc"}"#,
            r#"{"id": -5}"#,
            r#"{"id": 0}"#,
            r#"{"Records": [{}]}"#,
            r#"{"Records": [{"messageId": "x"}]}"#,
            r#"{"pages": 2, "id": "abc"}"#,
        ] {
            assert!(parse(payload).is_err(), "accepted {payload}");
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes() {
        let pages = Arc::new(ScriptedPages::new().with_page(
            "https://www.imoveiscuritiba.com.br/apartamentos-curitiba-pr.html",
            listing_html(&[101, 102], Some("page2")),
        ));
        let store = Arc::new(MemoryStore::new());
        store.put(&sample_record(101)).await.unwrap();
        let queue = Arc::new(MemoryQueue::new());
        let pipeline = Pipeline::new(Arc::new(Config::default()), pages, store, queue.clone());

        let crawl = dispatch(&pipeline, parse(r#"{"pages": 1}"#).unwrap()).await.unwrap();
        assert_eq!(
            crawl["https://www.imoveiscuritiba.com.br/apartamentos-curitiba-pr.html"]["ids"],
            serde_json::json!([101, 102])
        );
        assert_eq!(queue.len(), 2);

        let lookup = dispatch(&pipeline, parse(r#"{"id": "101"}"#).unwrap()).await.unwrap();
        assert_eq!(lookup["source"], "cache");

        let batch = parse(r#"{"Records": [{"body": "{\"id\":101}"}]}"#).unwrap();
        let outcomes = dispatch(&pipeline, batch).await.unwrap();
        assert_eq!(outcomes[0]["outcome"], "cached");
        assert_eq!(queue.len(), 2);
    }
}
