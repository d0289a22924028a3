//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of
//! `SearchIndexProvider` using the OpenSearch Rust client.

use std::collections::HashMap;

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::IndexConfig;
use crate::types::{BulkItemFailure, BulkWriteSummary};
use stream_indexer_shared::{Batch, IndexOperation};

/// Body of a bulk API response, reduced to the fields this client
/// inspects.
#[derive(Debug, Deserialize)]
struct BulkResponse {
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, BulkItem>>,
}

/// Per-operation entry in a bulk response, keyed by action name
/// (`index` or `delete`).
#[derive(Debug, Deserialize)]
struct BulkItem {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default)]
    status: u16,
    error: Option<BulkItemError>,
}

#[derive(Debug, Deserialize)]
struct BulkItemError {
    #[serde(default)]
    reason: String,
}

/// OpenSearch client implementation.
///
/// Holds one reusable transport; the client is cheap to share across
/// concurrent invocations behind an `Arc`.
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The target index configuration
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Render a batch as bulk API action/source line pairs, in batch
    /// order.
    fn bulk_body(batch: &Batch) -> Vec<JsonBody<Value>> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(batch.len() * 2);

        for operation in batch.operations() {
            match operation {
                IndexOperation::Upsert { doc_id, document } => {
                    body.push(json!({ "index": { "_id": doc_id } }).into());
                    body.push(Value::Object(document.clone()).into());
                }
                IndexOperation::Delete { doc_id } => {
                    body.push(json!({ "delete": { "_id": doc_id } }).into());
                }
            }
        }

        body
    }

    /// Reduce a parsed bulk response to a write summary.
    fn summarize_response(total: usize, response: BulkResponse) -> BulkWriteSummary {
        if !response.errors {
            return BulkWriteSummary::all_succeeded(total);
        }

        let mut failures = Vec::new();
        for item in response.items {
            // Each entry holds exactly one action result.
            if let Some(result) = item.into_values().next() {
                if let Some(err) = result.error {
                    failures.push(BulkItemFailure {
                        doc_id: result.id,
                        status: result.status,
                        reason: err.reason,
                    });
                }
            }
        }

        BulkWriteSummary {
            total,
            succeeded: total - failures.len(),
            failed: failures.len(),
            failures,
        }
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    /// Submit a batch as one bulk request and summarize the per-item
    /// outcome.
    ///
    /// An empty batch returns an empty summary without touching the
    /// network. Transport-level failures (connection refused, timeout,
    /// non-2xx response) surface as `SearchIndexError::BulkWriteError`;
    /// per-document rejections do not, they are reported through the
    /// summary instead.
    async fn bulk_write(&self, batch: &Batch) -> Result<BulkWriteSummary, SearchIndexError> {
        if batch.is_empty() {
            debug!("Empty batch, no bulk request issued");
            return Ok(BulkWriteSummary::empty());
        }

        let total = batch.len();
        let body = Self::bulk_body(batch);

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.name))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_write(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_write(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let parsed: BulkResponse = response
            .json()
            .await
            .map_err(|e| SearchIndexError::response_parse(e.to_string()))?;

        let summary = Self::summarize_response(total, parsed);
        debug!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk write completed"
        );
        Ok(summary)
    }

    /// Ensure the target index exists, creating it with a dynamic
    /// mapping if it does not.
    ///
    /// A concurrent provisioner winning the creation race is treated as
    /// success.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let name = &self.index_config.name;

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %name, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(name))
            .body(self.index_config.creation_body())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %name, "Created search index");
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();
        if error_body.contains("resource_already_exists_exception") {
            debug!(index = %name, "Index created concurrently");
            return Ok(());
        }

        error!(status = %status, body = %error_body, "Index creation failed");
        Err(SearchIndexError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, error_body
        )))
    }

    /// Ping the cluster.
    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stream_indexer_shared::Document;

    fn upsert(doc_id: &str, body: Value) -> IndexOperation {
        let Value::Object(document) = body else {
            panic!("expected object body");
        };
        IndexOperation::Upsert {
            doc_id: doc_id.to_string(),
            document,
        }
    }

    #[test]
    fn test_bulk_body_pairs_actions_with_sources() {
        let batch: Batch = vec![
            upsert("1", json!({"id": "1", "name": "widget"})),
            IndexOperation::Delete {
                doc_id: "2".to_string(),
            },
        ]
        .into_iter()
        .collect();

        let body = OpenSearchClient::bulk_body(&batch);

        // Upsert contributes an action line and a source line; delete
        // contributes an action line only.
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn test_bulk_body_empty_batch() {
        let batch = Batch::new();
        assert!(OpenSearchClient::bulk_body(&batch).is_empty());
    }

    #[test]
    fn test_summarize_response_complete_success() {
        let response: BulkResponse = serde_json::from_value(json!({
            "took": 12,
            "errors": false,
            "items": [
                {"index": {"_id": "1", "status": 201}},
                {"delete": {"_id": "2", "status": 200}}
            ]
        }))
        .unwrap();

        let summary = OpenSearchClient::summarize_response(2, response);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 2);
        assert!(summary.is_complete_success());
    }

    #[test]
    fn test_summarize_response_partial_failure() {
        let response: BulkResponse = serde_json::from_value(json!({
            "took": 8,
            "errors": true,
            "items": [
                {"index": {"_id": "1", "status": 201}},
                {"index": {
                    "_id": "2",
                    "status": 400,
                    "error": {"type": "mapper_parsing_exception", "reason": "failed to parse"}
                }}
            ]
        }))
        .unwrap();

        let summary = OpenSearchClient::summarize_response(2, response);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].doc_id, "2");
        assert_eq!(summary.failures[0].status, 400);
        assert_eq!(summary.failures[0].reason, "failed to parse");
    }

    #[test]
    fn test_summarize_response_delete_not_found_is_not_a_failure() {
        // A delete of a missing document reports 404 without an error
        // object and does not set the errors flag.
        let response: BulkResponse = serde_json::from_value(json!({
            "took": 3,
            "errors": false,
            "items": [
                {"delete": {"_id": "9", "status": 404, "result": "not_found"}}
            ]
        }))
        .unwrap();

        let summary = OpenSearchClient::summarize_response(1, response);
        assert!(summary.is_complete_success());
    }

    #[test]
    fn test_upsert_document_round_trips_into_source_line() {
        let mut document = Document::new();
        document.insert("qty".to_string(), json!(42));
        let batch: Batch = vec![IndexOperation::Upsert {
            doc_id: "1".to_string(),
            document,
        }]
        .into_iter()
        .collect();

        let body = OpenSearchClient::bulk_body(&batch);
        assert_eq!(body.len(), 2);
    }
}
