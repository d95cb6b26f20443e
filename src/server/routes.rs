//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse, Response};

use super::{AppState, ServerError};
use crate::output::RegisterPage;
use crate::resolve::resolve;

/// Handle GET /
///
/// Loads the table synchronously; with an SDS source this may scan the
/// document root on the first request.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let table = state.source.load()?;
    log::debug!("Rendering {} rows", table.len());
    let html = RegisterPage::new(&state.title, &table).to_html()?;
    Ok(Html(html))
}

/// Handle GET /pdf/{*path}
///
/// Every failure is a bare 404, including paths that do not percent-decode
/// to UTF-8.
pub async fn pdf(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ServerError> {
    let Path(path) = path.map_err(|e| {
        log::debug!("Rejected document path: {}", e);
        ServerError::NotFound
    })?;
    let root = state.document_root.as_deref().ok_or(ServerError::NotFound)?;
    let file = resolve(root, &path).map_err(|_| ServerError::NotFound)?;

    let bytes = tokio::fs::read(&file).await.map_err(|e| {
        log::warn!("Failed to read {}: {}", file.display(), e);
        ServerError::NotFound
    })?;

    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    log::debug!("Serving {} ({} bytes)", file.display(), bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, inline_disposition(&name)),
        ],
        bytes,
    )
        .into_response())
}

/// `inline; filename="..."`, falling back to plain `inline` when the name
/// cannot be carried in a header.
fn inline_disposition(name: &str) -> HeaderValue {
    let sanitized: String = name
        .chars()
        .map(|c| if c == '"' || c == '\\' { '_' } else { c })
        .collect();
    HeaderValue::from_str(&format!("inline; filename=\"{sanitized}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"))
}
