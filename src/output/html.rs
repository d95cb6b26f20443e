//! HTML register page.
//!
//! Renders a [`Table`] into a self-contained page using the `askama` template
//! engine: a warning banner, a search box, a row counter and the table itself.
//! Filtering happens in the browser; an embedded script hides rows whose text
//! does not contain the query (case-insensitive) and updates the counter.
//!
//! All cell text is escaped by the template. When the table carries a
//! `PdfRelativePath` column, the `Material` cell of each row links to
//! `/pdf/<path>`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hazreg::output::html::RegisterPage;
//!
//! let page = RegisterPage::new("Hazardous Materials Register", &table);
//! let html = page.to_html().unwrap();
//! ```

use askama::Template;

use crate::table::Table;

/// Column whose value links to the served PDF.
const PATH_COLUMN: &str = "PdfRelativePath";
/// Preferred column to carry the link.
const LABEL_COLUMN: &str = "Material";

/// The full register page for the Askama template.
#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    /// Page heading and `<title>`
    pub title: String,
    /// Column headers in display order
    pub columns: Vec<String>,
    /// Rendered rows
    pub rows: Vec<Vec<HtmlCell>>,
    /// Number of rows, for the initial counter
    pub total: usize,
}

/// One table cell, optionally linked.
pub struct HtmlCell {
    /// Display text
    pub text: String,
    /// Link target, already URL-encoded
    pub href: Option<String>,
}

impl RegisterPage {
    /// Build the page model from a table.
    #[must_use]
    pub fn new(title: &str, table: &Table) -> Self {
        let path_col = table.column_position(PATH_COLUMN);
        let link_col = path_col.map(|p| table.column_position(LABEL_COLUMN).unwrap_or(p));

        let rows = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(idx, text)| HtmlCell {
                        text: text.clone(),
                        href: match (link_col, path_col) {
                            (Some(link), Some(path)) if link == idx && !row[path].is_empty() => {
                                Some(pdf_href(&row[path]))
                            }
                            _ => None,
                        },
                    })
                    .collect()
            })
            .collect();

        Self {
            title: title.to_string(),
            columns: table.columns.clone(),
            rows,
            total: table.len(),
        }
    }

    /// Generate the HTML string using the embedded template.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn to_html(&self) -> Result<String, askama::Error> {
        self.render()
    }
}

/// Build the `/pdf/...` URL for a forward-slash relative path, encoding
/// each segment.
#[must_use]
pub fn pdf_href(relative_path: &str) -> String {
    let encoded: Vec<_> = relative_path.split('/').map(urlencoding::encode).collect();
    format!("/pdf/{}", encoded.join("/"))
}

/// Errors that can occur during HTML output generation.
#[derive(thiserror::Error, Debug)]
pub enum HtmlOutputError {
    /// Template rendering error
    #[error("HTML template error: {0}")]
    Template(#[from] askama::Error),
}
