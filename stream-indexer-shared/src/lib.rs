//! # Stream Indexer Shared
//!
//! Shared types and data structures for the stream indexer system.
//!
//! This crate defines the change-stream wire format (`AttributeValue`,
//! `ChangeEvent`, `StreamDelivery`) and the vocabulary the pipeline
//! produces for the search index (`Document`, `IndexOperation`, `Batch`).

pub mod attribute;
pub mod event;
pub mod operation;

pub use attribute::{AttributeMap, AttributeValue};
pub use event::{ChangeEvent, EventKind, RecordImages, StreamDelivery};
pub use operation::{Batch, Document, IndexOperation};
