//! Safe resolution of user-supplied document paths.
//!
//! A requested path is joined onto the canonical document root and then
//! canonicalized itself, which follows symlinks and removes `.`/`..`. The
//! result is accepted only if it is a regular file whose canonical path has
//! the canonical root as a strict ancestor. The comparison is done on path
//! components, not on strings, so it does not depend on separator conventions.
//!
//! Every rejection is the same [`InvalidOrUnsafePath`] value. Callers map it
//! to a plain 404 so clients cannot probe the filesystem layout.

use std::fs;
use std::path::{Path, PathBuf};

/// A requested path was missing, not a file, or outside the document root.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid or unsafe path")]
pub struct InvalidOrUnsafePath;

/// Resolve `user_relative_path` under `document_root`.
///
/// Returns the canonical absolute path of the file on success.
///
/// # Errors
///
/// Returns [`InvalidOrUnsafePath`] for absolute inputs, paths that do not
/// exist, directories, and anything resolving outside the root.
///
/// # Example
///
/// ```no_run
/// use hazreg::resolve::resolve;
/// use std::path::Path;
///
/// assert!(resolve(Path::new("sds"), "../../etc/passwd").is_err());
/// ```
pub fn resolve(
    document_root: &Path,
    user_relative_path: &str,
) -> Result<PathBuf, InvalidOrUnsafePath> {
    let requested = Path::new(user_relative_path);
    if user_relative_path.is_empty() || requested.has_root() || requested.is_absolute() {
        return reject(user_relative_path, "not a relative path");
    }

    let Ok(root) = document_root.canonicalize() else {
        return reject(user_relative_path, "document root cannot be resolved");
    };
    let Ok(resolved) = root.join(requested).canonicalize() else {
        return reject(user_relative_path, "path does not resolve");
    };

    if resolved == root || !resolved.starts_with(&root) {
        return reject(user_relative_path, "outside document root");
    }

    match fs::metadata(&resolved) {
        Ok(meta) if meta.is_file() => Ok(resolved),
        _ => reject(user_relative_path, "not a regular file"),
    }
}

fn reject(requested: &str, reason: &str) -> Result<PathBuf, InvalidOrUnsafePath> {
    log::debug!("Rejected document path {:?}: {}", requested, reason);
    Err(InvalidOrUnsafePath)
}
