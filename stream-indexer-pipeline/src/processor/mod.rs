//! Processor module for the stream indexer pipeline.
//!
//! Classifies change events and assembles them into an ordered batch of
//! index operations.

mod change_processor;

pub use change_processor::{BatchOutcome, ChangeProcessor, DEFAULT_PRIMARY_KEY_FIELD};
