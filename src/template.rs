//! Fixed-order export of tabular data.
//!
//! [`Exporter`] declares the steps a format must provide. [`Export::export`]
//! is the skeleton that runs them: validate, header, every row in order,
//! footer. `Export` has a blanket implementation for every `Exporter`, so
//! formats supply steps but can never reorder or skip them.
//!
//! # Example
//!
//! ```rust
//! use statecraft::template::{CsvExporter, Export, Table};
//!
//! let mut table = Table::new(["state", "label"]);
//! table.push_row(["Closed", "CLOSED"]).unwrap();
//!
//! let csv = CsvExporter::default().export(&table).unwrap();
//! assert_eq!(csv, "state,label\nClosed,CLOSED\n");
//! ```

use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Row {row} has {found} fields, expected {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rows of string cells under named columns. Every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, row: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(ExportError::WidthMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Steps of an export format.
pub trait Exporter {
    /// Format name for logs.
    fn format(&self) -> &'static str;

    /// Hook run before anything is written. Accepts every table by default.
    fn validate(&self, _table: &Table) -> Result<(), ExportError> {
        Ok(())
    }

    fn header(&self, columns: &[String], out: &mut String) -> Result<(), ExportError>;

    fn row(
        &self,
        index: usize,
        columns: &[String],
        cells: &[String],
        out: &mut String,
    ) -> Result<(), ExportError>;

    /// Written after the last row. Writes nothing by default.
    fn footer(&self, _rows: usize, _out: &mut String) -> Result<(), ExportError> {
        Ok(())
    }
}

/// The export skeleton. Implemented for every [`Exporter`].
pub trait Export: Exporter {
    fn export(&self, table: &Table) -> Result<String, ExportError>;
}

impl<T: Exporter + ?Sized> Export for T {
    fn export(&self, table: &Table) -> Result<String, ExportError> {
        self.validate(table)?;

        let mut out = String::new();
        self.header(table.columns(), &mut out)?;
        for (index, cells) in table.rows().iter().enumerate() {
            self.row(index, table.columns(), cells, &mut out)?;
        }
        self.footer(table.len(), &mut out)?;

        debug!(
            format = self.format(),
            rows = table.len(),
            bytes = out.len(),
            "table exported"
        );
        Ok(out)
    }
}

/// Comma-separated values with RFC 4180 quoting.
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    delimiter: u8,
}

impl CsvExporter {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn record(&self, fields: &[String], out: &mut String) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(fields)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        out.push_str(&String::from_utf8_lossy(&bytes));
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::with_delimiter(b',')
    }
}

impl Exporter for CsvExporter {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn header(&self, columns: &[String], out: &mut String) -> Result<(), ExportError> {
        self.record(columns, out)
    }

    fn row(
        &self,
        _index: usize,
        _columns: &[String],
        cells: &[String],
        out: &mut String,
    ) -> Result<(), ExportError> {
        self.record(cells, out)
    }
}

/// A JSON array with one object per row, keyed by column name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn format(&self) -> &'static str {
        "json"
    }

    // Object keys must be unique.
    fn validate(&self, table: &Table) -> Result<(), ExportError> {
        let mut seen = HashSet::new();
        for column in table.columns() {
            if !seen.insert(column.as_str()) {
                return Err(ExportError::DuplicateColumn(column.clone()));
            }
        }
        Ok(())
    }

    fn header(&self, _columns: &[String], out: &mut String) -> Result<(), ExportError> {
        out.push('[');
        Ok(())
    }

    fn row(
        &self,
        index: usize,
        columns: &[String],
        cells: &[String],
        out: &mut String,
    ) -> Result<(), ExportError> {
        if index > 0 {
            out.push(',');
        }
        let object: Map<String, Value> = columns
            .iter()
            .cloned()
            .zip(cells.iter().cloned().map(Value::String))
            .collect();
        out.push_str(&serde_json::to_string(&Value::Object(object))?);
        Ok(())
    }

    fn footer(&self, _rows: usize, out: &mut String) -> Result<(), ExportError> {
        out.push(']');
        Ok(())
    }
}
