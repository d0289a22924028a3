//! Result types for bulk write operations.

/// One document rejected within an otherwise accepted bulk write.
#[derive(Debug, Clone)]
pub struct BulkItemFailure {
    /// Identifier of the rejected document.
    pub doc_id: String,
    /// HTTP-style status the index reported for this item.
    pub status: u16,
    /// Reason string from the index, if any.
    pub reason: String,
}

/// Summary of one bulk write request.
///
/// The index evaluates bulk writes per document, not per batch, so a
/// transport-level success can still carry individual rejections. The
/// summary makes partial failures visible to the caller.
#[derive(Debug, Clone, Default)]
pub struct BulkWriteSummary {
    /// Total number of operations submitted.
    pub total: usize,
    /// Number of operations the index accepted.
    pub succeeded: usize,
    /// Number of operations the index rejected.
    pub failed: usize,
    /// Details for each rejected operation.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkWriteSummary {
    /// Summary for an empty batch: nothing submitted, nothing failed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Summary for a batch the index accepted in full.
    pub fn all_succeeded(total: usize) -> Self {
        Self {
            total,
            succeeded: total,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// Whether every submitted operation was accepted.
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}
