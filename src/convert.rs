//! Batch conversion over a whole query library.
//!
//! One bad record never sinks a batch: failures are attributed to the
//! record's input position and conversion moves on. Diagnostic reporting is
//! the caller's concern; the batch only carries the data.

use std::collections::HashSet;

use crate::error::QshiftError;
use crate::filter;
use crate::library::{ConvertedRecord, QueryDocument, QueryRecord};
use crate::rewrite;

/// A single record that failed conversion.
#[derive(Debug)]
pub struct RecordFailure {
    /// Zero-based position in the input sequence.
    pub index: usize,
    /// The record's description, for diagnostics.
    pub description: String,
    pub reason: QshiftError,
}

/// The outcome of converting a record sequence.
#[derive(Debug, Default)]
pub struct ConversionBatch {
    /// Successfully converted records, in input order.
    pub converted: Vec<ConvertedRecord>,
    /// Per-record failures, in input order.
    pub failures: Vec<RecordFailure>,
}

impl ConversionBatch {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Wrap the converted records into the output document.
    pub fn into_document(self) -> QueryDocument {
        QueryDocument::new(self.converted)
    }
}

/// Convert every admitted record, collecting successes and failures.
///
/// Records rejected by the group filter are skipped silently; they are
/// neither converted nor counted as failures. The batch always runs to the
/// end of the input.
pub fn convert(records: &[QueryRecord], inclusion_set: &HashSet<String>) -> ConversionBatch {
    let mut batch = ConversionBatch::default();

    for (index, record) in records.iter().enumerate() {
        if !filter::admit(&record.group, inclusion_set) {
            continue;
        }
        match rewrite::convert_query(&record.query) {
            Ok(query) => batch
                .converted
                .push(ConvertedRecord::from_record(record, query)),
            Err(reason) => batch.failures.push(RecordFailure {
                index,
                description: record.description.clone(),
                reason,
            }),
        }
    }

    batch
}
