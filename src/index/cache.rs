//! Persisted index snapshot.
//!
//! The cache is a CSV file with the [`INDEX_COLUMNS`] header. Its lifecycle
//! has two states:
//!
//! * [`CacheState::Missing`]: no file on disk. The next [`IndexCache::load_or_build`]
//!   scans the document root and writes the file.
//! * [`CacheState::Built`]: the file exists and is read as-is, however old it is.
//!
//! Nothing moves a cache from `Built` back to `Missing` except deleting the
//! file, either externally or through [`IndexCache::invalidate`].
//!
//! # Concurrency
//!
//! Writes are not locked. Two processes rebuilding the same cache at once can
//! overwrite each other's output.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::{build_index, IndexError, SdsIndexEntry, INDEX_COLUMNS};
use crate::table::Table;

/// Lifecycle state of the index cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No cache file on disk
    Missing,
    /// Cache file present; trusted regardless of age
    Built,
}

impl std::fmt::Display for CacheState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheState::Missing => write!(f, "missing"),
            CacheState::Built => write!(f, "built"),
        }
    }
}

/// Handle to the index cache file.
#[derive(Debug, Clone)]
pub struct IndexCache {
    path: PathBuf,
}

impl IndexCache {
    /// Create a handle for the cache at `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> CacheState {
        if self.path.is_file() {
            CacheState::Built
        } else {
            CacheState::Missing
        }
    }

    /// Last modification time of the cache file, if it exists.
    #[must_use]
    pub fn last_written(&self) -> Option<DateTime<Local>> {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from)
    }

    /// Read the cache if present, otherwise build it from `document_root`.
    ///
    /// This is the only `Missing -> Built` transition. A `Built` cache is
    /// never compared against the filesystem.
    ///
    /// # Errors
    ///
    /// Propagates scan errors from [`build_index`] and read/write errors
    /// from the cache file.
    pub fn load_or_build(&self, document_root: &Path) -> Result<Table, IndexError> {
        match self.state() {
            CacheState::Built => {
                log::debug!("Reading index cache {}", self.path.display());
            }
            CacheState::Missing => {
                log::info!(
                    "Index cache {} missing, scanning {}",
                    self.path.display(),
                    document_root.display()
                );
                self.rebuild(document_root)?;
            }
        }
        self.read()
    }

    /// Scan `document_root` and overwrite the cache unconditionally.
    ///
    /// # Errors
    ///
    /// Propagates scan errors and write errors.
    pub fn rebuild(&self, document_root: &Path) -> Result<Vec<SdsIndexEntry>, IndexError> {
        let entries = build_index(document_root)?;
        self.persist(&entries)?;
        Ok(entries)
    }

    /// Write `entries` to the cache file, replacing any previous content.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] or [`IndexError::Cache`] if writing fails.
    pub fn persist(&self, entries: &[SdsIndexEntry]) -> Result<(), IndexError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| IndexError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let cache_err = |source| IndexError::Cache {
            path: self.path.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&self.path).map_err(cache_err)?;
        if entries.is_empty() {
            writer.write_record(INDEX_COLUMNS).map_err(cache_err)?;
        }
        for entry in entries {
            writer.serialize(entry).map_err(cache_err)?;
        }
        writer.flush().map_err(|source| IndexError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!(
            "Wrote {} index entries to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the cache file as a raw table. Columns come from the file header.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the file cannot be opened and
    /// [`IndexError::Cache`] if it is not valid CSV.
    pub fn read(&self) -> Result<Table, IndexError> {
        let file = fs::File::open(&self.path).map_err(|source| IndexError::Io {
            path: self.path.clone(),
            source,
        })?;
        Table::read_csv(file).map_err(|source| IndexError::Cache {
            path: self.path.clone(),
            source,
        })
    }

    /// Delete the cache file. Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the file exists but cannot be removed.
    pub fn invalidate(&self) -> Result<bool, IndexError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Removed index cache {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(IndexError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
