//! In-process work queue.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::PropertyMessage;
use crate::queue::WorkQueue;

/// FIFO queue of encoded message bodies, drained by the local consumer.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    bodies: Mutex<VecDeque<String>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending messages.
    pub fn len(&self) -> usize {
        self.bodies.lock().map(|bodies| bodies.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every pending message body, oldest first.
    pub fn drain(&self) -> Result<Vec<String>> {
        let mut bodies = self
            .bodies
            .lock()
            .map_err(|e| AppError::queue(format!("lock poisoned: {e}")))?;
        Ok(bodies.drain(..).collect())
    }
}

#[async_trait]
impl WorkQueue for MemoryQueue {
    async fn send(&self, message: &PropertyMessage) -> Result<()> {
        let body = message.to_body()?;
        self.bodies
            .lock()
            .map_err(|e| AppError::queue(format!("lock poisoned: {e}")))?
            .push_back(body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_then_drain() {
        let queue = MemoryQueue::new();
        queue.send(&PropertyMessage::new(1)).await.unwrap();
        queue.send(&PropertyMessage::new(2)).await.unwrap();
        assert_eq!(queue.len(), 2);

        let bodies = queue.drain().unwrap();
        assert_eq!(bodies, vec![r#"{"id":1}"#, r#"{"id":2}"#]);
        assert!(queue.is_empty());
    }
}
