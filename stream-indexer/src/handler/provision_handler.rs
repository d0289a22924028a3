//! Handler for index provisioning.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::handler::InvocationContext;
use crate::IndexingError;
use stream_indexer_repository::SearchIndexProvider;

/// One-off handler that makes sure the target index exists.
///
/// Idempotent and invoked outside the hot path; the stream handler
/// assumes the index is already there.
pub struct ProvisionHandler {
    provider: Arc<dyn SearchIndexProvider>,
}

impl ProvisionHandler {
    /// Create a new provision handler over the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Ensure the search index exists.
    #[instrument(skip(self, context), fields(request_id = %context.request_id))]
    pub async fn handle(&self, context: &InvocationContext) -> Result<(), IndexingError> {
        self.provider.ensure_index_exists().await?;
        info!("Search index provisioned");
        Ok(())
    }
}
