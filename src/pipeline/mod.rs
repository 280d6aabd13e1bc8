//! Pipeline entry points for crawler operations.
//!
//! - `PaginationCrawler`: walk the listing index page by page
//! - `FanoutPublisher`: push every discovered id onto the work queue
//! - `QueueConsumer`: fetch queued ids to warm the record store
//! - `Pipeline`: the three above plus direct lookups, wired to one set of backends

pub mod consume;
pub mod crawl;
pub mod fanout;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use consume::{ConsumeOutcome, QueueConsumer};
pub use crawl::PaginationCrawler;
pub use fanout::FanoutPublisher;
pub use pipeline::Pipeline;
