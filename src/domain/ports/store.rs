//! Processed-state store port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Collection, ProcessedRecord};

/// Port for the append-only record store the pipeline dedupes against.
///
/// Lookups are by exact `unique_key` match within a collection. The store
/// is read/append-only: records are never updated or removed, and at most
/// one pipeline instance is assumed per org/repo.
#[async_trait]
pub trait ProcessedStore: Send + Sync {
    /// Find a record by its unique key. The most recently appended match
    /// wins when a key was written more than once.
    async fn find(
        &self,
        collection: Collection,
        unique_key: &str,
    ) -> DomainResult<Option<ProcessedRecord>>;

    /// Append a record to a collection.
    async fn append(&self, collection: Collection, record: &ProcessedRecord) -> DomainResult<()>;

    /// Whether a record with this unique key exists.
    async fn exists(&self, collection: Collection, unique_key: &str) -> DomainResult<bool> {
        Ok(self.find(collection, unique_key).await?.is_some())
    }
}
