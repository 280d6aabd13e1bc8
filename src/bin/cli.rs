//! Listing Crawler CLI
//!
//! Local execution entry point. Records are cached under the storage
//! directory and fanned-out ids go to an in-process queue. For AWS Lambda,
//! use `listing-crawler-lambda`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use listing_crawler::{
    config::load_config,
    error::Result,
    models::PropertyLookup,
    pipeline::{ConsumeOutcome, Pipeline},
    queue::MemoryQueue,
    storage::LocalStore,
    utils::HttpPageSource,
};

/// Property listing crawler
#[derive(Parser, Debug)]
#[command(
    name = "listing-crawler",
    version,
    about = "Crawls property listings and caches their details"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Record store directory (overrides storage.root_dir)
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk the listing index and queue every listing id
    Crawl {
        /// Number of index pages to visit
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Fetch every queued id afterwards to warm the store
        #[arg(long)]
        warm: bool,
    },

    /// Look up a single property, fetching it on a cache miss
    Property {
        /// Listing id
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(&cli.config)?;
    if let Some(dir) = cli.storage_dir {
        config.storage.root_dir = dir;
    }
    let config = Arc::new(config);

    if let Command::Validate = cli.command {
        log::info!("✓ Config OK");
        log::info!("    base_url: {}", config.crawler.base_url);
        log::info!("    first page: {}", config.crawler.first_page_path);
        log::info!("    strict pagination: {}", config.crawler.strict_pagination);
        log::info!("    store: {}", config.storage.root_dir.display());
        return Ok(());
    }

    let store = Arc::new(LocalStore::new(&config.storage.root_dir));
    let queue = Arc::new(MemoryQueue::new());
    let source = Arc::new(HttpPageSource::from_config(&config.crawler)?);
    log::info!("Using record store at {}", store.root_dir().display());

    let pipeline = Pipeline::new(Arc::clone(&config), source, store, queue.clone());

    match cli.command {
        Command::Crawl { pages, warm } => {
            let report = pipeline.crawl(pages).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if warm {
                let bodies = queue.drain()?;
                log::info!("Warming store with {} queued ids", bodies.len());
                let outcomes = pipeline.consume(&bodies).await?;

                let crawled = outcomes
                    .iter()
                    .filter(|o| matches!(o, ConsumeOutcome::Crawled { .. }))
                    .count();
                let failed = outcomes
                    .iter()
                    .filter(|o| matches!(o, ConsumeOutcome::Failed { .. }))
                    .count();
                log::info!(
                    "Warm-up complete: {} crawled, {} cached, {} failed",
                    crawled,
                    outcomes.len() - crawled - failed,
                    failed
                );
            } else if !queue.is_empty() {
                log::info!("{} ids queued; rerun with --warm to fetch them", queue.len());
            }
        }

        Command::Property { id } => {
            let lookup = pipeline.lookup(id).await?;
            if let PropertyLookup::Failed(failure) = &lookup {
                log::error!("Lookup of {} failed: {}", id, failure.message);
            }
            println!("{}", serde_json::to_string_pretty(&lookup)?);
        }

        Command::Validate => {}
    }

    Ok(())
}
