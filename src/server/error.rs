//! Server error types with HTTP status code mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::output::HtmlOutputError;
use crate::source::SourceError;

/// Errors a request handler can end with.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Records could not be loaded from the configured source
    #[error("{0}")]
    Source(#[from] SourceError),

    /// Page rendering failed
    #[error("{0}")]
    Render(#[from] HtmlOutputError),

    /// Not Found (404); the reason is never sent to the client
    #[error("Not Found")]
    NotFound,
}

impl ServerError {
    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Source(_) | ServerError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<askama::Error> for ServerError {
    fn from(err: askama::Error) -> Self {
        ServerError::Render(HtmlOutputError::Template(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        (status, self.to_string()).into_response()
    }
}
