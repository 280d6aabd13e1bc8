//! AWS S3 record store.
//!
//! Each property is a single JSON object at `{prefix}/properties/{id}.json`.
//! S3 gives last-writer-wins semantics per key, which is all the cache needs.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use log::{debug, info};

use crate::error::{AppError, Result};
use crate::models::{PropertyRecord, StorageConfig};
use crate::storage::{RecordStore, record_key};

/// S3-based record storage.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Store {
    /// Create a new S3 storage instance.
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Create S3 storage from the shared AWS environment configuration.
    pub async fn from_env(config: &StorageConfig) -> Result<Self> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&aws_config);

        Ok(Self::new(client, &config.bucket, &config.prefix))
    }

    /// Object key for a property id.
    fn key(&self, id: u64) -> String {
        let prefix = self.prefix.trim_matches('/');
        if prefix.is_empty() {
            record_key(id)
        } else {
            format!("{}/{}", prefix, record_key(id))
        }
    }

    /// Read an object, returning None if the key does not exist.
    async fn read_bytes_optional(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output
                    .body
                    .collect()
                    .await
                    .map_err(|e| AppError::store(e.to_string()))?;
                Ok(Some(bytes.into_bytes().to_vec()))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    debug!("No object at s3://{}/{}", self.bucket, key);
                    Ok(None)
                } else {
                    Err(AppError::store(service_err))
                }
            }
        }
    }
}

#[async_trait]
impl RecordStore for S3Store {
    async fn get(&self, id: u64) -> Result<Option<PropertyRecord>> {
        match self.read_bytes_optional(&self.key(id)).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, record: &PropertyRecord) -> Result<()> {
        let key = self.key(record.id);
        let json = serde_json::to_vec(record)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(json))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| AppError::store(e.into_service_error()))?;

        info!("Wrote record {} to s3://{}/{}", record.id, self.bucket, key);
        Ok(())
    }
}
