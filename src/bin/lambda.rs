//! AWS Lambda entry point for the listing crawler.
//!
//! Deploy with `cargo lambda build --release --features lambda`. The same
//! function is attached to the HTTP routes and to the queue trigger
//! (batch size 1).
//!
//! ## Environment Variables
//!
//! - `CONFIG_PATH`: optional bundled TOML configuration
//! - `BASE_URL`: site root for listing and detail pages
//! - `CRAWL_TIMEOUT_SECS`: HTTP request timeout
//! - `STRICT_PAGINATION`: fail instead of stopping when no next page exists
//! - `S3_BUCKET` / `S3_PREFIX`: record store location
//! - `QUEUE_NAME`: work queue name
//! - `FAILURE_POLICY`: `discard` or `fail` for soft failures in queue batches
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use listing_crawler::config::load_lambda_config;
use listing_crawler::lambda;
use listing_crawler::pipeline::Pipeline;
use listing_crawler::queue::SqsQueue;
use listing_crawler::storage::S3Store;
use listing_crawler::utils::HttpPageSource;

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Listing crawler Lambda starting...");

    let config = Arc::new(load_lambda_config()?);
    let source = Arc::new(HttpPageSource::from_config(&config.crawler)?);
    let store = Arc::new(S3Store::from_env(&config.storage).await?);
    let queue = Arc::new(SqsQueue::from_env(&config.queue).await?);
    let pipeline = Pipeline::new(config, source, store, queue);

    let pipeline = &pipeline;
    lambda_runtime::run(service_fn(move |event| lambda::handler(pipeline, event))).await
}
