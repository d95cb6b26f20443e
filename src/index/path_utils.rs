//! Name and path helpers for index entries.
//!
//! macOS stores file names in NFD (decomposed) form while most other systems
//! use NFC, so the same visible material name can arrive as different byte
//! sequences. Display labels are normalized to NFC; relative paths are kept
//! byte-for-byte so they still resolve on disk.
//!
//! # Example
//!
//! ```
//! use hazreg::index::path_utils::material_label;
//!
//! assert_eq!(material_label("  Benzene__MSDS_v2 "), "Benzene MSDS v2");
//! ```

use std::path::{Component, Path};

use unicode_normalization::UnicodeNormalization;

/// Normalize a string to NFC (Composed) form.
#[must_use]
pub fn normalize_nfc(s: &str) -> String {
    s.nfc().collect()
}

/// Derive a human-readable material label from a file stem.
///
/// Underscores become spaces, whitespace runs collapse to a single space,
/// outer whitespace is trimmed and the result is NFC-normalized.
#[must_use]
pub fn material_label(stem: &str) -> String {
    let spaced = stem.replace('_', " ");
    let collapsed = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
    normalize_nfc(&collapsed)
}

/// Render a relative path with `/` separators regardless of host conventions.
///
/// Returns `None` when the path is not valid UTF-8 or is not a plain
/// relative path (root, prefix or `..` components).
#[must_use]
pub fn to_forward_slashes(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}
