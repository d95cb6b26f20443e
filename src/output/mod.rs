//! Output formatters for the register.
//!
//! - [`html`]: the searchable page served at `/`
//! - [`json`]: machine-readable export
//!
//! CSV export goes through [`Table::write_csv`](crate::table::Table::write_csv)
//! directly, since the table already is one spreadsheet.

pub mod html;
pub mod json;

// Re-export main types
pub use html::{HtmlOutputError, RegisterPage};
pub use json::JsonOutput;
