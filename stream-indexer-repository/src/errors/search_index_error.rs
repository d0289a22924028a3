//! Search index error types.
//!
//! This module defines the error types that can occur while talking to
//! the search index.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to establish connection to the search index.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to serialize a batch into a bulk request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The bulk write transport call failed outright.
    #[error("Bulk write error: {0}")]
    BulkWriteError(String),

    /// Failed to parse a response from the search index.
    #[error("Response parse error: {0}")]
    ResponseParseError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a bulk write error.
    pub fn bulk_write(msg: impl Into<String>) -> Self {
        Self::BulkWriteError(msg.into())
    }

    /// Create a response parse error.
    pub fn response_parse(msg: impl Into<String>) -> Self {
        Self::ResponseParseError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }
}
