//! JSON export of the current register.
//!
//! The document keeps column order explicit by emitting `columns` and `rows`
//! as arrays rather than one object per record:
//!
//! ```json
//! {
//!   "title": "Hazardous Materials Register",
//!   "generated_at": "2024-01-15T10:30:00+00:00",
//!   "row_count": 1,
//!   "columns": ["MaterialCode", "MaterialName"],
//!   "rows": [["HM-001", "Benzene"]]
//! }
//! ```

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::table::Table;

/// Serializable export envelope.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Register title
    pub title: &'a str,
    /// Export timestamp (RFC 3339)
    pub generated_at: String,
    /// Number of rows
    pub row_count: usize,
    /// Column names in display order
    pub columns: &'a [String],
    /// Row cells
    pub rows: &'a [Vec<String>],
}

impl<'a> JsonOutput<'a> {
    /// Wrap a table for export.
    #[must_use]
    pub fn new(title: &'a str, table: &'a Table) -> Self {
        let now: DateTime<Utc> = Utc::now();
        Self {
            title,
            generated_at: now.to_rfc3339(),
            row_count: table.len(),
            columns: &table.columns,
            rows: &table.rows,
        }
    }

    /// Pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer).map_err(serde_json::Error::io)
    }
}
