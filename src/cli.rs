//! Command-line interface definitions for hazreg.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options control logging and error output; subcommands select what to do with
//! the configured record source.
//!
//! # Example
//!
//! ```bash
//! # Serve the built-in demo table on 127.0.0.1:5000
//! hazreg serve
//!
//! # Serve a directory of safety data sheets
//! hazreg serve --source sds --document-root ./sds
//!
//! # Force a rescan of the SDS index
//! hazreg index --rebuild --document-root ./sds
//!
//! # Dump the current table as JSON
//! hazreg export --source spreadsheet --spreadsheet hazmat.csv --format json
//! ```

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Searchable hazardous-materials register.
///
/// Serves a single HTML page listing hazard records from an inline table, a CSV
/// spreadsheet, or an indexed directory of safety data sheets.
#[derive(Debug, Parser)]
#[command(name = "hazreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON objects
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Configuration file (TOML). Defaults to the platform config directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Build, rebuild or inspect the SDS index cache
    Index(IndexArgs),
    /// Print the configured source's table to stdout
    Export(ExportArgs),
}

/// Where records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Seed table from configuration
    #[default]
    Inline,
    /// CSV spreadsheet
    Spreadsheet,
    /// Indexed directory of PDF safety data sheets
    Sds,
}

impl std::fmt::Display for SourceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceMode::Inline => write!(f, "inline"),
            SourceMode::Spreadsheet => write!(f, "spreadsheet"),
            SourceMode::Sds => write!(f, "sds"),
        }
    }
}

/// Options selecting and locating the record source.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Record source mode
    #[arg(long, value_enum)]
    pub source: Option<SourceMode>,

    /// CSV spreadsheet for spreadsheet mode
    #[arg(long, value_name = "PATH")]
    pub spreadsheet: Option<PathBuf>,

    /// Directory of PDF safety data sheets for sds mode
    #[arg(long, value_name = "DIR")]
    pub document_root: Option<PathBuf>,

    /// Location of the SDS index cache
    #[arg(long, value_name = "PATH")]
    pub index_cache: Option<PathBuf>,
}

/// Arguments for the serve subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "ADDR")]
    pub host: Option<IpAddr>,

    /// Port to bind
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the index subcommand.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Directory of PDF safety data sheets
    #[arg(long, value_name = "DIR")]
    pub document_root: Option<PathBuf>,

    /// Location of the SDS index cache
    #[arg(long, value_name = "PATH")]
    pub index_cache: Option<PathBuf>,

    /// Discard any existing cache and rescan
    #[arg(long, conflicts_with = "status")]
    pub rebuild: bool,

    /// Report the cache state without scanning
    #[arg(long)]
    pub status: bool,
}

/// Arguments for the export subcommand.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Output format for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV with a header row
    Csv,
    /// JSON object with `columns` and `rows`
    Json,
}
