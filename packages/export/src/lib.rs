#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CSV export for parsed incident reports.
//!
//! [`CsvExporter`] is the [`RowSink`] the pipeline writes through: the header
//! record once per batch, then one record per incident. The writer flushes
//! after every record so a batch interrupted mid-dispatch still leaves
//! complete rows on disk.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use blotter_extract::pipeline::{RowSink, SinkError};
use thiserror::Error;

/// Errors from creating or writing the export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem failure on the export path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV serialization failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// [`RowSink`] that writes the batch to a single CSV file.
pub struct CsvExporter {
    writer: csv::Writer<File>,
    headers: Vec<&'static str>,
}

impl CsvExporter {
    /// Creates the export file at `path`, truncating anything already there.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Csv`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, ExportError> {
        let writer = csv::Writer::from_path(path)?;
        log::debug!("exporting to {}", path.display());
        Ok(Self {
            writer,
            headers: Vec::new(),
        })
    }
}

#[async_trait]
impl RowSink for CsvExporter {
    async fn write_header(&mut self, headers: &[&'static str]) -> Result<(), SinkError> {
        self.headers = headers.to_vec();
        self.writer
            .write_record(headers)
            .map_err(ExportError::from)?;
        self.writer.flush().map_err(ExportError::from)?;
        Ok(())
    }

    async fn write_row(&mut self, row: &BTreeMap<&'static str, String>) -> Result<(), SinkError> {
        let cells = self
            .headers
            .iter()
            .map(|header| row.get(header).map_or("", String::as_str));
        self.writer
            .write_record(cells)
            .map_err(ExportError::from)?;
        self.writer.flush().map_err(ExportError::from)?;
        Ok(())
    }
}
