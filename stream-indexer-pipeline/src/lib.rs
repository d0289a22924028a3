//! # Stream Indexer Pipeline
//!
//! This crate provides the pipeline components for projecting
//! change-stream events into the search index.
//!
//! ## Architecture
//!
//! The pipeline follows the Decoder-Processor-Loader pattern:
//!
//! 1. **Decoder**: Converts typed attribute values into JSON documents
//! 2. **Processor**: Classifies change events and assembles the batch
//! 3. **Loader**: Submits the batch as one bulk write

pub mod decoder;
pub mod errors;
pub mod loader;
pub mod processor;

pub use errors::{DecodeError, PipelineError, RecordError};
pub use loader::BatchLoader;
pub use processor::{BatchOutcome, ChangeProcessor};
