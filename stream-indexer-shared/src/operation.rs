//! Index operations and batches.
//!
//! The pipeline turns change events into an ordered sequence of
//! document writes against the search index.

use serde_json::{Map, Value};

/// The decoded, untyped document body produced by the attribute decoder.
pub type Document = Map<String, Value>;

/// A single write against the search index.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexOperation {
    /// Index or replace the document stored under `doc_id`.
    Upsert {
        /// Target document identifier (the source record's primary key).
        doc_id: String,
        /// Decoded document body.
        document: Document,
    },
    /// Remove the document stored under `doc_id`.
    Delete {
        /// Target document identifier.
        doc_id: String,
    },
}

impl IndexOperation {
    /// The document identifier this operation targets.
    pub fn doc_id(&self) -> &str {
        match self {
            Self::Upsert { doc_id, .. } | Self::Delete { doc_id } => doc_id,
        }
    }
}

/// Ordered collection of index operations assembled from one delivery.
///
/// Batch order matches input event order; a batch may be empty, in
/// which case no network call is required to "submit" it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    operations: Vec<IndexOperation>,
}

impl Batch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation, preserving insertion order.
    pub fn push(&mut self, operation: IndexOperation) {
        self.operations.push(operation);
    }

    /// Whether the batch contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations in the batch.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// The operations, in batch order.
    pub fn operations(&self) -> &[IndexOperation] {
        &self.operations
    }
}

impl FromIterator<IndexOperation> for Batch {
    fn from_iter<I: IntoIterator<Item = IndexOperation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_order() {
        let mut batch = Batch::new();
        batch.push(IndexOperation::Upsert {
            doc_id: "1".to_string(),
            document: Document::new(),
        });
        batch.push(IndexOperation::Delete {
            doc_id: "2".to_string(),
        });

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.operations()[0].doc_id(), "1");
        assert_eq!(batch.operations()[1].doc_id(), "2");
    }

    #[test]
    fn test_empty_batch() {
        let batch = Batch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}
