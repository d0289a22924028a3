//! Handler for change-stream deliveries.

use tracing::{error, info, instrument};

use crate::handler::InvocationContext;
use stream_indexer_pipeline::{BatchLoader, ChangeProcessor};
use stream_indexer_shared::StreamDelivery;

/// Hot-path handler: one invocation processes one delivery to
/// completion.
///
/// The runtime's contract is fire-and-forget: the handler returns no
/// meaningful value, and an indexing failure is logged rather than
/// escalated, so the delivery counts as handled either way
/// (at-least-once, best-effort semantics).
pub struct StreamHandler {
    processor: ChangeProcessor,
    loader: BatchLoader,
}

impl StreamHandler {
    /// Create a new handler over the given processor and loader.
    pub fn new(processor: ChangeProcessor, loader: BatchLoader) -> Self {
        Self { processor, loader }
    }

    /// Process one change-stream delivery.
    #[instrument(
        skip(self, delivery, context),
        fields(request_id = %context.request_id, record_count = delivery.records.len())
    )]
    pub async fn handle(&self, delivery: StreamDelivery, context: &InvocationContext) {
        let outcome = self.processor.build_batch(&delivery.records);

        match self.loader.submit(&outcome.batch).await {
            Ok(summary) => {
                info!(
                    indexed = summary.succeeded,
                    rejected = summary.failed,
                    skipped = outcome.skipped.len(),
                    "Processed delivery"
                );
            }
            Err(e) => {
                error!(error = %e, "Bulk write failed; delivery not retried");
            }
        }
    }
}
