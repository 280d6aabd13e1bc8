// src/pipeline/consume.rs

//! Queue consumer that warms the record store.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{FailurePolicy, PropertyLookup, PropertyMessage, Source};
use crate::services::PropertyDetailFetcher;

/// What happened to a single queue message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ConsumeOutcome {
    /// Already in the store; nothing fetched
    Cached { id: u64 },
    /// Fetched and stored
    Crawled { id: u64 },
    /// Page could not be fetched; nothing stored
    Failed { id: u64, message: String },
}

impl ConsumeOutcome {
    fn from_lookup(id: u64, lookup: PropertyLookup) -> Self {
        match lookup {
            PropertyLookup::Found(property) => match property.source {
                Source::Cache => Self::Cached { id },
                Source::Crawler => Self::Crawled { id },
            },
            PropertyLookup::Failed(failure) => Self::Failed {
                id,
                message: failure.message,
            },
        }
    }
}

/// Consumes fanned-out messages, fetching each property for its side effect.
pub struct QueueConsumer {
    fetcher: Arc<PropertyDetailFetcher>,
    policy: FailurePolicy,
}

impl QueueConsumer {
    pub fn new(fetcher: Arc<PropertyDetailFetcher>, policy: FailurePolicy) -> Self {
        Self { fetcher, policy }
    }

    /// Process a batch of raw message bodies in order.
    ///
    /// Malformed bodies and fatal fetch errors abort the batch. Soft fetch
    /// failures are handled according to the configured `FailurePolicy`.
    pub async fn consume<S: AsRef<str>>(&self, bodies: &[S]) -> Result<Vec<ConsumeOutcome>> {
        let mut outcomes = Vec::with_capacity(bodies.len());

        for body in bodies {
            let message = PropertyMessage::from_body(body.as_ref())?;
            let lookup = self.fetcher.fetch(message.id).await?;
            let outcome = ConsumeOutcome::from_lookup(message.id, lookup);

            if let ConsumeOutcome::Failed { id, message } = &outcome {
                match self.policy {
                    FailurePolicy::Discard => {
                        log::warn!("Discarding message for property {}: {}", id, message);
                    }
                    FailurePolicy::Fail => {
                        return Err(AppError::queue(format!(
                            "fetch of property {id} failed: {message}"
                        )));
                    }
                }
            }

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
