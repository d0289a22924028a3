//! Loader module for the stream indexer pipeline.
//!
//! Submits assembled batches to the search index as one bulk write.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::errors::PipelineError;
use stream_indexer_repository::{BulkWriteSummary, SearchIndexProvider};
use stream_indexer_shared::Batch;

/// Loader that submits batches to the search index.
///
/// One batch maps to at most one bulk request; an empty batch is a
/// no-op. The index evaluates bulk writes per document, so the loader
/// inspects the returned summary and logs every rejected document.
/// Rejections are reported, not retried: the upstream change stream
/// delivers at least once, so a redelivery covers them.
pub struct BatchLoader {
    provider: Arc<dyn SearchIndexProvider>,
}

impl BatchLoader {
    /// Create a new loader over the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Submit a batch to the search index.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkWriteSummary)` - Per-document outcome; partial
    ///   failures are carried in the summary, not surfaced as errors
    /// * `Err(PipelineError)` - If the bulk write fails at the
    ///   transport level
    #[instrument(skip(self, batch), fields(operation_count = batch.len()))]
    pub async fn submit(&self, batch: &Batch) -> Result<BulkWriteSummary, PipelineError> {
        if batch.is_empty() {
            debug!("Empty batch, nothing to submit");
            return Ok(BulkWriteSummary::empty());
        }

        let summary = self.provider.bulk_write(batch).await?;

        if summary.is_complete_success() {
            info!(indexed = summary.succeeded, "Bulk write accepted in full");
        } else {
            for failure in &summary.failures {
                error!(
                    doc_id = %failure.doc_id,
                    status = failure.status,
                    reason = %failure.reason,
                    "Document rejected by index"
                );
            }
            warn!(
                failed = summary.failed,
                total = summary.total,
                "Bulk write completed with rejected documents"
            );
        }

        Ok(summary)
    }

    /// Ensure the search index exists.
    pub async fn ensure_index(&self) -> Result<(), PipelineError> {
        self.provider.ensure_index_exists().await?;
        Ok(())
    }

    /// Check if the search index backend is healthy.
    pub async fn health_check(&self) -> Result<bool, PipelineError> {
        Ok(self.provider.health_check().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stream_indexer_repository::{BulkItemFailure, SearchIndexError};
    use stream_indexer_shared::{Document, IndexOperation};

    /// Mock provider for testing.
    struct MockProvider {
        bulk_calls: AtomicUsize,
        fail_transport: bool,
        reject_doc: Option<String>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                bulk_calls: AtomicUsize::new(0),
                fail_transport: false,
                reject_doc: None,
            }
        }

        fn failing_transport() -> Self {
            Self {
                fail_transport: true,
                ..Self::new()
            }
        }

        fn rejecting(doc_id: &str) -> Self {
            Self {
                reject_doc: Some(doc_id.to_string()),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockProvider {
        async fn bulk_write(&self, batch: &Batch) -> Result<BulkWriteSummary, SearchIndexError> {
            self.bulk_calls.fetch_add(1, Ordering::SeqCst);

            if self.fail_transport {
                return Err(SearchIndexError::bulk_write("connection refused"));
            }

            if let Some(ref rejected) = self.reject_doc {
                let failures: Vec<_> = batch
                    .operations()
                    .iter()
                    .filter(|op| op.doc_id() == rejected)
                    .map(|op| BulkItemFailure {
                        doc_id: op.doc_id().to_string(),
                        status: 400,
                        reason: "mapper_parsing_exception".to_string(),
                    })
                    .collect();
                return Ok(BulkWriteSummary {
                    total: batch.len(),
                    succeeded: batch.len() - failures.len(),
                    failed: failures.len(),
                    failures,
                });
            }

            Ok(BulkWriteSummary::all_succeeded(batch.len()))
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(true)
        }
    }

    fn upsert(doc_id: &str) -> IndexOperation {
        IndexOperation::Upsert {
            doc_id: doc_id.to_string(),
            document: Document::new(),
        }
    }

    #[tokio::test]
    async fn test_empty_batch_issues_no_call() {
        let provider = Arc::new(MockProvider::new());
        let loader = BatchLoader::new(provider.clone());

        let summary = loader.submit(&Batch::new()).await.unwrap();

        assert_eq!(summary.total, 0);
        assert!(summary.is_complete_success());
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_empty_batch_issues_one_call() {
        let provider = Arc::new(MockProvider::new());
        let loader = BatchLoader::new(provider.clone());

        let batch: Batch = vec![upsert("1"), upsert("2")].into_iter().collect();
        let summary = loader.submit(&batch).await.unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_error() {
        let provider = Arc::new(MockProvider::failing_transport());
        let loader = BatchLoader::new(provider);

        let batch: Batch = vec![upsert("1")].into_iter().collect();
        let result = loader.submit(&batch).await;

        assert!(matches!(result, Err(PipelineError::SearchIndex(_))));
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported_not_raised() {
        let provider = Arc::new(MockProvider::rejecting("2"));
        let loader = BatchLoader::new(provider.clone());

        let batch: Batch = vec![upsert("1"), upsert("2"), upsert("3")]
            .into_iter()
            .collect();
        let summary = loader.submit(&batch).await.unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].doc_id, "2");
        // No retry: exactly one bulk call.
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_idempotent_resubmission() {
        let provider = Arc::new(MockProvider::new());
        let loader = BatchLoader::new(provider.clone());

        let batch: Batch = vec![upsert("1")].into_iter().collect();
        let first = loader.submit(&batch).await.unwrap();
        let second = loader.submit(&batch).await.unwrap();

        // Same batch, same outcome: upserts are last-write-wins on the
        // document identifier.
        assert_eq!(first.succeeded, second.succeeded);
        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 2);
    }
}
