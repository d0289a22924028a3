//! Search index provider trait definition.
//!
//! This module defines the abstract interface for the search index,
//! allowing for different backend implementations (OpenSearch, mock, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::BulkWriteSummary;
use stream_indexer_shared::Batch;

/// Abstract interface for search index operations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`: change-stream deliveries
/// for different shards may be processed concurrently, each issuing
/// bulk writes through the same shared provider handle.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Submit a batch of index operations as one bulk write.
    ///
    /// The index evaluates each operation independently; the returned
    /// summary reports which operations were accepted and which were
    /// rejected. Implementations must not issue a network call for an
    /// empty batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - The ordered operations to submit
    ///
    /// # Returns
    ///
    /// * `Ok(BulkWriteSummary)` - Per-document outcome of the bulk write
    /// * `Err(SearchIndexError)` - If the request fails at the transport level
    async fn bulk_write(&self, batch: &Batch) -> Result<BulkWriteSummary, SearchIndexError>;

    /// Ensure the target index exists, creating it if necessary.
    ///
    /// Idempotent: invoking it against an existing index succeeds
    /// without modifying the index.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Check if the search index backend is reachable and healthy.
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
