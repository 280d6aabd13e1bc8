// src/pipeline/fanout.rs

//! Fanout of discovered listing ids onto the work queue.

use std::sync::Arc;

use crate::error::Result;
use crate::models::PropertyMessage;
use crate::queue::WorkQueue;

/// Publishes one queue message per listing id.
pub struct FanoutPublisher {
    queue: Arc<dyn WorkQueue>,
}

impl FanoutPublisher {
    pub fn new(queue: Arc<dyn WorkQueue>) -> Self {
        Self { queue }
    }

    /// Send every id as its own message, duplicates included.
    ///
    /// Returns the number of messages sent. Does not wait for consumers.
    pub async fn publish(&self, ids: &[u64]) -> Result<usize> {
        for &id in ids {
            self.queue.send(&PropertyMessage::new(id)).await?;
        }
        log::debug!("Fanned out {} ids", ids.len());
        Ok(ids.len())
    }
}
