//! OpenSearch index configuration.
//!
//! The document bodies this pipeline indexes are untyped, so the index
//! carries no explicit field mappings; OpenSearch maps fields
//! dynamically as documents arrive.

use serde_json::{json, Value};

/// Default name of the search index.
pub const DEFAULT_INDEX_NAME: &str = "records";

/// Configuration for the target search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Index name bulk writes are addressed to.
    pub name: String,
    /// Number of primary shards, applied at creation time.
    pub shards: u32,
    /// Number of replicas, applied at creation time.
    pub replicas: u32,
}

impl IndexConfig {
    /// Create a configuration for the given index name with default
    /// sharding (one primary shard, one replica).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shards: 1,
            replicas: 1,
        }
    }

    /// Get the creation body for the index: settings plus a dynamic
    /// mapping (no target schema is enforced).
    pub fn creation_body(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.shards,
                "number_of_replicas": self.replicas
            },
            "mappings": {
                "dynamic": true
            }
        })
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_body_structure() {
        let config = IndexConfig::new("records");
        let body = config.creation_body();

        assert_eq!(body["settings"]["number_of_shards"], 1);
        assert_eq!(body["settings"]["number_of_replicas"], 1);
        assert_eq!(body["mappings"]["dynamic"], true);
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(IndexConfig::default().name, "records");
    }
}
