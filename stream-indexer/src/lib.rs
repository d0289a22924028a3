//! # Stream Indexer
//!
//! Entry points for the change-stream search indexer.
//!
//! This crate wires the pipeline components together from the
//! environment and exposes the two handlers the external event runtime
//! invokes: `StreamHandler` for change-stream deliveries (the hot path)
//! and `ProvisionHandler` for one-off index provisioning.

pub mod config;
pub mod handler;
pub mod telemetry;

pub use config::Dependencies;
pub use handler::{InvocationContext, ProvisionHandler, StreamHandler};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] stream_indexer_pipeline::PipelineError),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] stream_indexer_repository::SearchIndexError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
