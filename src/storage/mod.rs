//! Record store abstractions for cached property details.
//!
//! The store is a plain keyed cache: `get` returns a record only if a fetch for
//! that id previously completed, and `put` overwrites unconditionally. There is
//! no update-in-place, delete or expiry.
//!
//! ## Backends
//!
//! ```text
//! MemoryStore   in-process map (tests, dry runs)
//! LocalStore    {root}/properties/{id}.json
//! S3Store       s3://{bucket}/{prefix}/properties/{id}.json   (feature "aws")
//! ```

pub mod local;
pub mod memory;
#[cfg(feature = "aws")]
pub mod s3;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PropertyRecord;

// Re-export for convenience
pub use local::LocalStore;
pub use memory::MemoryStore;
#[cfg(feature = "aws")]
pub use s3::S3Store;

/// Trait for property record storage backends.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record by id. A missing key is `Ok(None)`, not an error.
    async fn get(&self, id: u64) -> Result<Option<PropertyRecord>>;

    /// Store a record under its id, overwriting any previous value.
    async fn put(&self, record: &PropertyRecord) -> Result<()>;
}

/// Relative key of a record within a store.
pub fn record_key(id: u64) -> String {
    format!("properties/{id}.json")
}
