//! Error types for the stream indexer pipeline.

use thiserror::Error;

use stream_indexer_repository::SearchIndexError;

/// Error decoding one attribute value.
///
/// The closed tag enum leaves a single malformed case: a numeric-string
/// attribute whose literal is not a valid decimal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A numeric-string attribute carried an unparseable literal.
    #[error("Invalid numeric literal '{0}'")]
    InvalidNumber(String),
}

/// A change event that could not be converted into an index operation.
///
/// Record errors are recovered by skipping the offending event; they
/// never abort the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The event lacked the record image its kind requires.
    #[error("Event carries no {0} image")]
    MissingImage(&'static str),

    /// The decoded document has no usable primary-key field.
    #[error("Decoded document has no usable '{field}' field")]
    MissingPrimaryKey {
        /// Name of the expected primary-key field.
        field: String,
    },

    /// The primary-key field decoded to a non-scalar value.
    #[error("Primary-key field '{field}' is not a scalar")]
    NonScalarPrimaryKey {
        /// Name of the primary-key field.
        field: String,
    },

    /// A field in the record image failed to decode.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Errors that can occur in the stream indexer pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the processor component.
    #[error("Processor error: {0}")]
    ProcessorError(String),

    /// Error from the loader component.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// Error from the search index.
    #[error("Search index error: {0}")]
    SearchIndex(#[from] SearchIndexError),
}

impl PipelineError {
    /// Create a processor error.
    pub fn processor(msg: impl Into<String>) -> Self {
        Self::ProcessorError(msg.into())
    }

    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}
