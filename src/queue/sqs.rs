//! AWS SQS work queue.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use log::{debug, info};

use crate::error::{AppError, Result};
use crate::models::{PropertyMessage, QueueConfig};
use crate::queue::WorkQueue;

/// SQS-backed work queue. The queue URL is resolved once at construction.
#[derive(Clone)]
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    /// Create the queue handle from the shared AWS environment configuration.
    pub async fn from_env(config: &QueueConfig) -> Result<Self> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&aws_config);

        let output = client
            .get_queue_url()
            .queue_name(&config.queue_name)
            .send()
            .await
            .map_err(|e| AppError::queue(e.into_service_error()))?;
        let queue_url = output.queue_url().ok_or_else(|| {
            AppError::queue(format!("no URL returned for queue {}", config.queue_name))
        })?;

        info!("Resolved queue {} to {}", config.queue_name, queue_url);
        Ok(Self::new(client, queue_url))
    }
}

#[async_trait]
impl WorkQueue for SqsQueue {
    async fn send(&self, message: &PropertyMessage) -> Result<()> {
        self.client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(message.to_body()?)
            .send()
            .await
            .map_err(|e| AppError::queue(e.into_service_error()))?;

        debug!("Queued property {}", message.id);
        Ok(())
    }
}
