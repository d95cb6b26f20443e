//! Display-ready tabular data shared by every record source.
//!
//! A [`Table`] is the common currency between the record sources, the HTML
//! renderer and the exporters: an ordered list of column names plus rows of
//! plain strings. Column order is display order.

use std::io;

use serde::Serialize;

/// Ordered columns and string rows, ready for rendering.
///
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Column names in display order
    pub columns: Vec<String>,
    /// Rows of display strings, one cell per column
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given columns.
    #[must_use]
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

    /// Append a row, padding missing cells with `""` and dropping cells
    /// that have no column.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        let width = self.columns.len();
        if cells.len() > width {
            log::debug!(
                "Dropping {} cell(s) beyond the {} declared columns",
                cells.len() - width,
                width
            );
        }
        cells.resize(width, String::new());
        self.rows.push(cells);
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column.
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rewrite every cell of one column in place. Unknown columns are a no-op.
    pub fn map_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if let Some(idx) = self.column_position(name) {
            for row in &mut self.rows {
                row[idx] = f(&row[idx]);
            }
        }
    }

    /// Read a CSV document with a header row.
    ///
    /// The header becomes the column list. Rows may be shorter or longer
    /// than the header; see [`Table::push_row`].
    ///
    /// # Errors
    ///
    /// Returns a `csv::Error` if the input is not valid CSV or not UTF-8.
    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let mut table = Self::new(csv_reader.headers()?.iter());
        for record in csv_reader.records() {
            let record = record?;
            table.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    /// Write the table as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns a `csv::Error` if writing fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
