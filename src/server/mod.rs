//! HTTP server for the register.
//!
//! # Endpoints
//!
//! - `GET /` - the register page for the configured source
//! - `GET /pdf/{*path}` - a safety data sheet under the document root (sds mode only)
//!
//! The server runs on a current-thread tokio runtime. The page handler does
//! its file I/O synchronously, so requests are handled one at a time.

pub mod error;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;

pub use error::ServerError;

use crate::cli::SourceMode;
use crate::config::Config;
use crate::source::{self, RecordSource};

/// Application state shared across handlers.
pub struct AppState {
    /// Where page records come from
    pub source: Box<dyn RecordSource>,
    /// Page heading
    pub title: String,
    /// Root for `/pdf/...`; `None` outside sds mode
    pub document_root: Option<PathBuf>,
}

impl AppState {
    /// Build state from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            source: source::from_config(config),
            title: config.title.clone(),
            document_root: (config.source == SourceMode::Sds).then(|| config.document_root.clone()),
        }
    }
}

/// Build the router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/pdf/{*path}", get(routes::pdf))
        .with_state(state)
}

/// Start the server and block until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the runtime cannot start, the address cannot be
/// bound, or the server fails while running.
pub fn run(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(serve(config))
}

async fn serve(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config));
    log::info!("Serving records from {}", state.source.describe());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("Listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
