//! Work queue abstractions for fanned-out property ids.
//!
//! Delivery semantics belong to the backend. The crawler assumes
//! at-least-once, unordered delivery and never waits on consumers.

pub mod memory;
#[cfg(feature = "aws")]
pub mod sqs;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PropertyMessage;

pub use memory::MemoryQueue;
#[cfg(feature = "aws")]
pub use sqs::SqsQueue;

/// Trait for work queue backends.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Enqueue one message. Returns once the backend has accepted it.
    async fn send(&self, message: &PropertyMessage) -> Result<()>;
}
