//! CSV spreadsheet source.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{RecordSource, SourceError};
use crate::table::Table;

/// Source that re-reads a CSV file on every load.
///
/// Whatever header the file carries becomes the display columns; there is
/// no schema check.
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    path: PathBuf,
}

impl SpreadsheetSource {
    /// Create a source for the spreadsheet at `path`.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl RecordSource for SpreadsheetSource {
    fn load(&self) -> Result<Table, SourceError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::FileNotFound(self.path.clone()));
            }
            Err(e) => {
                return Err(SourceError::Spreadsheet {
                    path: self.path.clone(),
                    source: e.into(),
                });
            }
        };

        let table = Table::read_csv(file).map_err(|source| SourceError::Spreadsheet {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Loaded {} rows from {}", table.len(), self.path.display());
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("spreadsheet {}", self.path.display())
    }
}
