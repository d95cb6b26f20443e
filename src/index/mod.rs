//! Safety-data-sheet index builder.
//!
//! Scans a document root for PDF files and derives one [`SdsIndexEntry`] per
//! file. The entries are persisted to a CSV cache by [`IndexCache`] so later
//! requests can skip the scan.
//!
//! # Architecture
//!
//! * [`build_index`]: recursive scan, name derivation and final ordering.
//! * [`cache`]: the persisted snapshot and its `Missing -> Built` lifecycle.
//! * [`path_utils`]: label normalization and forward-slash relative paths.
//!
//! # Example
//!
//! ```no_run
//! use hazreg::index::{build_index, IndexCache};
//! use std::path::Path;
//!
//! let entries = build_index(Path::new("sds")).unwrap();
//! IndexCache::new("sds_index.csv").persist(&entries).unwrap();
//! ```

pub mod cache;
pub mod path_utils;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

pub use cache::{CacheState, IndexCache};

/// Column names of the persisted index, in display order.
pub const INDEX_COLUMNS: [&str; 5] = [
    "Material",
    "Folder",
    "FileName",
    "FileSizeKB",
    "PdfRelativePath",
];

/// Column holding the numeric size, reformatted on every read.
pub const SIZE_COLUMN: &str = "FileSizeKB";

/// One indexed PDF document.
///
/// Field names serialize to the cache's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdsIndexEntry {
    /// Human-readable label derived from the file stem
    #[serde(rename = "Material")]
    pub material: String,
    /// Name of the immediate parent directory
    #[serde(rename = "Folder")]
    pub folder: String,
    /// File name including extension
    #[serde(rename = "FileName")]
    pub file_name: String,
    /// Size in KiB, rounded to one decimal place
    #[serde(rename = "FileSizeKB")]
    pub file_size_kb: f64,
    /// Path relative to the document root, `/`-separated
    #[serde(rename = "PdfRelativePath")]
    pub pdf_relative_path: String,
}

/// Errors that can occur while building or reading the index.
#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    /// The document root does not exist or is not a directory.
    #[error("Document directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// The scan finished without finding a single PDF.
    #[error("No PDF documents found under {0}")]
    NoDocumentsFound(PathBuf),

    /// An I/O error occurred on the given path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The cache file could not be written or parsed.
    #[error("Index cache error for {path}: {source}")]
    Cache {
        /// Path to the cache file
        path: PathBuf,
        /// The underlying CSV error
        #[source]
        source: csv::Error,
    },
}

/// Convert a byte count to KiB rounded to one decimal place.
#[must_use]
pub fn size_in_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 10.0).round() / 10.0
}

/// Scan `document_root` recursively and build the ordered index.
///
/// Only regular files whose extension is exactly `pdf` are indexed.
/// Symbolic links are skipped so that every entry resolves under the root.
/// Entries are sorted by folder, then material, then relative path.
///
/// # Errors
///
/// * [`IndexError::DirectoryNotFound`] if the root is missing.
/// * [`IndexError::NoDocumentsFound`] if no PDF is found.
/// * [`IndexError::Io`] if the root cannot be canonicalized.
pub fn build_index(document_root: &Path) -> Result<Vec<SdsIndexEntry>, IndexError> {
    if !document_root.is_dir() {
        return Err(IndexError::DirectoryNotFound(document_root.to_path_buf()));
    }
    let root = document_root
        .canonicalize()
        .map_err(|source| IndexError::Io {
            path: document_root.to_path_buf(),
            source,
        })?;

    let mut found: Vec<(String, PathBuf, u64)> = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            continue;
        }
        if !file_type.is_file() || entry.path().extension() != Some(OsStr::new("pdf")) {
            continue;
        }

        let Some(relative) = entry
            .path()
            .strip_prefix(&root)
            .ok()
            .and_then(path_utils::to_forward_slashes)
        else {
            log::warn!("Skipping non UTF-8 path: {}", entry.path().display());
            continue;
        };

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(e) => {
                log::warn!("Cannot read metadata for {}: {}", entry.path().display(), e);
                continue;
            }
        };

        found.push((relative, entry.into_path(), size));
    }

    if found.is_empty() {
        return Err(IndexError::NoDocumentsFound(document_root.to_path_buf()));
    }

    // Traversal order is lexicographic by relative path.
    found.sort_by(|a, b| a.0.cmp(&b.0));

    let total_bytes: u64 = found.iter().map(|(_, _, size)| size).sum();
    let mut entries: Vec<SdsIndexEntry> = found
        .into_iter()
        .map(|(relative, path, size)| entry_for(&path, relative, size))
        .collect();

    entries.sort_by(|a, b| {
        a.folder
            .cmp(&b.folder)
            .then_with(|| a.material.cmp(&b.material))
            .then_with(|| a.pdf_relative_path.cmp(&b.pdf_relative_path))
    });

    log::info!(
        "Indexed {} document(s), {} total, under {}",
        entries.len(),
        ByteSize::b(total_bytes),
        root.display()
    );
    Ok(entries)
}

/// Derive the entry fields for one discovered file.
fn entry_for(path: &Path, pdf_relative_path: String, size: u64) -> SdsIndexEntry {
    SdsIndexEntry {
        material: path_utils::material_label(&lossy(path.file_stem())),
        folder: lossy(path.parent().and_then(Path::file_name)),
        file_name: lossy(path.file_name()),
        file_size_kb: size_in_kb(size),
        pdf_relative_path,
    }
}

fn lossy(s: Option<&OsStr>) -> String {
    s.map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
