//! Safety-data-sheet directory source.

use std::path::{Path, PathBuf};

use super::{RecordSource, SourceError};
use crate::index::{IndexCache, SIZE_COLUMN};
use crate::table::Table;

/// Source backed by the SDS index cache.
///
/// The first load on a missing cache scans the document root; every later
/// load reads the cache file directly.
#[derive(Debug, Clone)]
pub struct SdsSource {
    document_root: PathBuf,
    cache: IndexCache,
}

impl SdsSource {
    /// Create a source over `document_root` with its cache at `cache_path`.
    #[must_use]
    pub fn new(document_root: &Path, cache_path: &Path) -> Self {
        Self {
            document_root: document_root.to_path_buf(),
            cache: IndexCache::new(cache_path),
        }
    }

    /// The underlying cache handle.
    #[must_use]
    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }
}

impl RecordSource for SdsSource {
    fn load(&self) -> Result<Table, SourceError> {
        let mut table = self.cache.load_or_build(&self.document_root)?;
        table.map_column(SIZE_COLUMN, format_size_field);
        Ok(table)
    }

    fn describe(&self) -> String {
        format!(
            "SDS directory {} (cache {})",
            self.document_root.display(),
            self.cache.path().display()
        )
    }
}

/// Show a size with exactly one decimal place when it parses as a finite
/// number; otherwise keep the raw text.
#[must_use]
pub fn format_size_field(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{value:.1}"),
        _ => raw.to_string(),
    }
}
