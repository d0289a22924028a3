//! Dependency initialization and wiring for the stream indexer.
//!
//! Everything is constructed once at process startup and passed
//! explicitly into the handlers; there are no ambient singletons.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::handler::{ProvisionHandler, StreamHandler};
use crate::IndexingError;
use stream_indexer_pipeline::{
    loader::BatchLoader,
    processor::{ChangeProcessor, DEFAULT_PRIMARY_KEY_FIELD},
};
use stream_indexer_repository::{
    opensearch::{IndexConfig, OpenSearchClient},
    SearchIndexProvider,
};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default search index name.
const DEFAULT_INDEX_NAME: &str = "records";

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Handler for change-stream deliveries (the hot path).
    pub stream_handler: StreamHandler,
    /// Handler for one-off index provisioning.
    pub provision_handler: ProvisionHandler,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_INDEX_NAME`: Target index name (default: records)
    /// - `PRIMARY_KEY_FIELD`: Primary-key field in decoded documents (default: id)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new() -> Result<Self, IndexingError> {
        dotenv::dotenv().ok();

        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let index_name =
            env::var("SEARCH_INDEX_NAME").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        let primary_key_field = env::var("PRIMARY_KEY_FIELD")
            .unwrap_or_else(|_| DEFAULT_PRIMARY_KEY_FIELD.to_string());

        info!(
            opensearch_url = %opensearch_url,
            index = %index_name,
            primary_key_field = %primary_key_field,
            "Initializing dependencies"
        );

        let client = OpenSearchClient::new(&opensearch_url, IndexConfig::new(index_name))
            .map_err(|e| {
                IndexingError::config(format!("Failed to create OpenSearch client: {}", e))
            })?;

        let provider: Arc<dyn SearchIndexProvider> = Arc::new(client);

        // Verify the index backend is reachable before taking traffic.
        let healthy = provider
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let processor = ChangeProcessor::with_primary_key_field(primary_key_field);
        let loader = BatchLoader::new(provider.clone());

        let stream_handler = StreamHandler::new(processor, loader);
        let provision_handler = ProvisionHandler::new(provider);

        Ok(Self {
            stream_handler,
            provision_handler,
        })
    }
}
