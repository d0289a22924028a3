//! Change event classification and batch assembly.
//!
//! Walks the change events of one delivery in order, decodes each
//! relevant record image, and appends one index operation per event.
//! Classification is fail-soft at event granularity: an event that
//! cannot be converted is logged and skipped, and the rest of the
//! delivery still indexes.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::decoder::decode_document;
use crate::errors::RecordError;
use stream_indexer_shared::{Batch, ChangeEvent, Document, EventKind, IndexOperation};

/// Default name of the primary-key field in decoded documents.
pub const DEFAULT_PRIMARY_KEY_FIELD: &str = "id";

/// Outcome of assembling one delivery into a batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Operations for every successfully converted event, in input order.
    pub batch: Batch,
    /// Errors for the events that were skipped.
    pub skipped: Vec<RecordError>,
}

/// Processor that converts change events into index operations.
///
/// Insert and modify events become upserts of the decoded new image.
/// Remove events become deletes keyed by the old image's primary key,
/// so removed source rows do not linger in the index.
pub struct ChangeProcessor {
    primary_key_field: String,
}

impl ChangeProcessor {
    /// Create a processor using the default primary-key field (`id`).
    pub fn new() -> Self {
        Self::with_primary_key_field(DEFAULT_PRIMARY_KEY_FIELD)
    }

    /// Create a processor extracting document identifiers from the
    /// given field of the decoded document.
    pub fn with_primary_key_field(field: impl Into<String>) -> Self {
        Self {
            primary_key_field: field.into(),
        }
    }

    /// Assemble one delivery's events into a batch.
    ///
    /// Events are classified in input order and the batch preserves
    /// that order. Conversion failures are collected in
    /// `BatchOutcome::skipped` instead of aborting the batch.
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub fn build_batch(&self, events: &[ChangeEvent]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for event in events {
            match self.classify(event) {
                Ok(operation) => outcome.batch.push(operation),
                Err(e) => {
                    warn!(
                        kind = ?event.event_kind,
                        error = %e,
                        "Skipping change event"
                    );
                    outcome.skipped.push(e);
                }
            }
        }

        debug!(
            operations = outcome.batch.len(),
            skipped = outcome.skipped.len(),
            "Assembled batch"
        );
        outcome
    }

    /// Convert one change event into an index operation.
    fn classify(&self, event: &ChangeEvent) -> Result<IndexOperation, RecordError> {
        match event.event_kind {
            EventKind::Inserted | EventKind::Modified => {
                let image = event
                    .change
                    .new_image
                    .as_ref()
                    .ok_or(RecordError::MissingImage("new"))?;
                let document = decode_document(image)?;
                let doc_id = self.primary_key(&document)?;
                Ok(IndexOperation::Upsert { doc_id, document })
            }
            EventKind::Removed => {
                let image = event
                    .change
                    .old_image
                    .as_ref()
                    .ok_or(RecordError::MissingImage("old"))?;
                let document = decode_document(image)?;
                let doc_id = self.primary_key(&document)?;
                Ok(IndexOperation::Delete { doc_id })
            }
        }
    }

    /// Extract the document identifier from a decoded document.
    ///
    /// String keys are taken verbatim; numeric keys are rendered
    /// textually. Absent, empty, and non-scalar keys are record errors.
    fn primary_key(&self, document: &Document) -> Result<String, RecordError> {
        match document.get(&self.primary_key_field) {
            Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
            Some(Value::Number(key)) => Ok(key.to_string()),
            Some(Value::Null) | Some(Value::String(_)) | None => {
                Err(RecordError::MissingPrimaryKey {
                    field: self.primary_key_field.clone(),
                })
            }
            Some(_) => Err(RecordError::NonScalarPrimaryKey {
                field: self.primary_key_field.clone(),
            }),
        }
    }
}

impl Default for ChangeProcessor {
    fn default() -> Self {
        Self::new()
    }
}
