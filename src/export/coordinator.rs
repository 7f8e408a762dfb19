//! Export coordinator for backup runs
//!
//! Drives one pass over the requested collections: read every document,
//! build the export record, serialize it, write the file, and report the
//! path. The first failure aborts the run; files written before it stay on
//! disk.

use std::io::Write;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::error::{BackupError, Result};
use crate::formatter::JsonFormatter;

use super::progress::ProgressTracker;
use super::record::ExportRecord;
use super::streaming::{DocumentBatches, DocumentSource};
use super::writer::JsonFileWriter;

/// Documents pulled from the stream between progress updates
const DEFAULT_BATCH_SIZE: usize = 100;

/// Result of exporting one collection
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Collection id
    pub collection: String,
    /// Absolute path of the written file
    pub path: std::path::PathBuf,
    /// Number of documents exported
    pub documents_exported: u64,
    /// File size in bytes
    pub file_size_bytes: u64,
    /// Time taken for the collection
    pub elapsed_ms: u64,
}

/// Coordinator for export operations
pub struct ExportCoordinator<'a> {
    /// Where documents come from
    source: &'a dyn DocumentSource,
    /// Serializer for export records
    formatter: JsonFormatter,
    /// Output file writer
    writer: JsonFileWriter,
    /// Documents per progress update
    batch_size: usize,
    /// Whether to draw a spinner per collection
    show_progress: bool,
}

impl<'a> ExportCoordinator<'a> {
    /// Create a new export coordinator
    ///
    /// # Arguments
    /// * `source` - Document source, usually a connected `FirestoreHandle`
    /// * `config` - Export configuration
    pub fn new(source: &'a dyn DocumentSource, config: &ExportConfig) -> Self {
        Self {
            source,
            formatter: JsonFormatter::new(config.indent),
            writer: JsonFileWriter::new(config.output_dir.clone()),
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: config.show_progress,
        }
    }

    /// Override the number of documents read between progress updates
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Export all collections, reporting each saved file on stdout
    ///
    /// # Arguments
    /// * `collections` - Collection ids, exported in the given order
    ///
    /// # Returns
    /// * `Result<Vec<ExportResult>>` - One result per collection, or the first error
    pub async fn execute(&self, collections: &[String]) -> Result<Vec<ExportResult>> {
        let mut stdout = std::io::stdout();
        self.execute_with_report(collections, &mut stdout).await
    }

    /// Export all collections, reporting each saved file to `out`
    ///
    /// Stops at the first error; remaining collections are not attempted.
    pub async fn execute_with_report<W: Write + Send>(
        &self,
        collections: &[String],
        out: &mut W,
    ) -> Result<Vec<ExportResult>> {
        let mut results = Vec::with_capacity(collections.len());

        for name in collections {
            let result = self.export_collection(name).await?;

            writeln!(
                out,
                "Saved collection {} to {}",
                name,
                result.path.display()
            )?;
            out.flush()?;

            results.push(result);
        }

        Ok(results)
    }

    /// Export a single collection
    ///
    /// 1. Open the paged query
    /// 2. Drain it into an export record
    /// 3. Reject empty collections
    /// 4. Serialize and write `<collection>.json`
    ///
    /// # Returns
    /// * `Result<ExportResult>` - Export statistics or error
    pub async fn export_collection(&self, name: &str) -> Result<ExportResult> {
        let start_time = Instant::now();
        info!("Exporting collection {}", name);

        let stream = self.source.stream(name).await?;
        let mut batches = DocumentBatches::new(stream, self.batch_size, name);
        let tracker = ProgressTracker::new(name, self.show_progress);
        let mut record = ExportRecord::new();

        loop {
            match batches.next_batch().await {
                Ok(Some(docs)) => {
                    record.extend(docs);
                    tracker.update(record.len() as u64);
                }
                Ok(None) => break,
                Err(e) => {
                    tracker.finish();
                    return Err(e);
                }
            }
        }

        batches.close();
        tracker.finish();

        if record.is_empty() {
            return Err(BackupError::EmptyCollection(name.to_string()));
        }

        debug!("Serializing {} documents from {}", record.len(), name);
        let contents = self.formatter.to_vec(&record)?;
        let path = self.writer.write(name, &contents).await?;

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Exported {}: {} documents, {} bytes, {} ms",
            name,
            record.len(),
            contents.len(),
            elapsed_ms
        );

        Ok(ExportResult {
            collection: name.to_string(),
            path,
            documents_exported: record.len() as u64,
            file_size_bytes: contents.len() as u64,
            elapsed_ms,
        })
    }
}
