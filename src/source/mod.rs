//! Record sources for the register page.
//!
//! Each source turns its configured input into a [`Table`]:
//!
//! - [`InlineSource`]: the seed table carried in the configuration
//! - [`SpreadsheetSource`]: a CSV file whose header defines the columns
//! - [`SdsSource`]: the safety-data-sheet index, built on first use
//!
//! # Example
//!
//! ```no_run
//! use hazreg::config::Config;
//! use hazreg::source::from_config;
//!
//! let source = from_config(&Config::default());
//! let table = source.load().unwrap();
//! println!("{} columns, {} rows", table.columns.len(), table.len());
//! ```

pub mod inline;
pub mod sds;
pub mod spreadsheet;

use std::path::PathBuf;

pub use inline::{Cell, InlineSource, SeedTable};
pub use sds::SdsSource;
pub use spreadsheet::SpreadsheetSource;

use crate::cli::SourceMode;
use crate::config::Config;
use crate::index::IndexError;
use crate::table::Table;

/// Errors that can occur while loading records.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// The configured spreadsheet does not exist.
    #[error("Spreadsheet not found: {0}")]
    FileNotFound(PathBuf),

    /// The spreadsheet exists but could not be read.
    #[error("Failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        /// Path to the spreadsheet
        path: PathBuf,
        /// The underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// Building or reading the document index failed.
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl SourceError {
    /// Whether the configured input (file or directory) is missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SourceError::FileNotFound(_) | SourceError::Index(IndexError::DirectoryNotFound(_))
        )
    }
}

/// A producer of display-ready records.
pub trait RecordSource: Send + Sync {
    /// Load the full table. Called once per page request.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] when the configured input is missing or unreadable.
    fn load(&self) -> Result<Table, SourceError>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// Build the source selected by `config.source`.
#[must_use]
pub fn from_config(config: &Config) -> Box<dyn RecordSource> {
    match config.source {
        SourceMode::Inline => Box::new(InlineSource::new(config.seed.clone())),
        SourceMode::Spreadsheet => Box::new(SpreadsheetSource::new(&config.spreadsheet)),
        SourceMode::Sds => Box::new(SdsSource::new(&config.document_root, &config.index_cache)),
    }
}
