// src/pipeline.rs
use serde::Serialize;

use crate::extractors::{AttributeExtractor, ExtractionOutcome};
use crate::mapping::{ColumnMapper, FormRecord, OutputSchema};
use crate::sources::{Description, DescriptionSource};

/// Records produced by one run, one per non-blank description, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    schema: OutputSchema,
    records: Vec<FormRecord>,
}

impl OutputTable {
    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    pub fn records(&self) -> &[FormRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Row counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub rows_read: usize,
    pub records: usize,
    pub skipped: usize,
    pub faulted: usize,
}

/// Extractor followed by column mapper, applied to each row in turn.
#[derive(Debug, Clone, Default)]
pub struct RowPipeline {
    extractor: AttributeExtractor,
    mapper: ColumnMapper,
}

impl RowPipeline {
    pub fn new(extractor: AttributeExtractor, mapper: ColumnMapper) -> Self {
        Self { extractor, mapper }
    }

    /// Processes every description the source yields.
    pub fn run(&self, source: &dyn DescriptionSource) -> (OutputTable, RunSummary) {
        tracing::info!("Processing descriptions from {}", source.label());
        self.process(source.descriptions())
    }

    /// Blank descriptions are skipped without a record. A row that cannot be
    /// read still yields a record carrying the error in the catch-all column.
    pub fn process<I>(&self, descriptions: I) -> (OutputTable, RunSummary)
    where
        I: IntoIterator<Item = Description>,
    {
        let mut summary = RunSummary::default();
        let mut records = Vec::new();

        for (row, description) in descriptions.into_iter().enumerate() {
            summary.rows_read += 1;
            let outcome = match description {
                Description::Blank => {
                    summary.skipped += 1;
                    continue;
                }
                Description::Text(text) => self.extractor.extract(&text),
                Description::Unreadable(reason) => ExtractionOutcome::Failed { reason },
            };

            if let ExtractionOutcome::Failed { reason } = &outcome {
                tracing::warn!("Row {}: {}", row + 1, reason);
                summary.faulted += 1;
            }

            let attributes = outcome.into_attributes();
            if attributes.is_empty() {
                tracing::debug!("Row {}: no attributes recognised", row + 1);
            } else {
                tracing::debug!("Row {}: extracted {} attributes {:?}", row + 1, attributes.len(), attributes);
            }
            records.push(self.mapper.project(&attributes));
        }

        summary.records = records.len();
        tracing::info!(
            "Processed {} rows: {} records, {} skipped, {} faulted",
            summary.rows_read,
            summary.records,
            summary.skipped,
            summary.faulted
        );

        let table = OutputTable {
            schema: self.mapper.schema().clone(),
            records,
        };
        (table, summary)
    }
}
