//! # Stream Indexer Repository
//!
//! This crate provides the trait and implementation for writing to the
//! search index. It includes definitions for errors, interfaces, and a
//! concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchClient};
pub use types::{BulkItemFailure, BulkWriteSummary};
