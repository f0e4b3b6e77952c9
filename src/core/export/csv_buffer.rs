//! In-memory CSV payload
//!
//! Rows are encoded as RFC 4180 records with CRLF line endings. Every row must
//! have the width of the first one; a mismatch is an error rather than a
//! ragged file.

use crate::core::transform::Row;
use crate::domain::{DataExportError, FieldPath, Result};

/// CSV writer over an owned byte buffer
pub struct CsvBuffer {
    writer: csv::Writer<Vec<u8>>,
    rows: usize,
}

impl CsvBuffer {
    pub fn new() -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .flexible(false)
            .from_writer(Vec::new());
        Self { writer, rows: 0 }
    }

    /// Write the field paths as a header record
    pub fn write_header(&mut self, fields: &[FieldPath]) -> Result<()> {
        self.writer
            .write_record(fields.iter().map(FieldPath::as_str))?;
        Ok(())
    }

    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        self.writer.write_record(row.cells())?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written (header excluded)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Finish the payload
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.writer
            .into_inner()
            .map_err(|e| DataExportError::Csv(e.error().to_string()))
    }
}

impl Default for CsvBuffer {
    fn default() -> Self {
        Self::new()
    }
}
