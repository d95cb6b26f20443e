//! Application configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file (`--config PATH`, or `config.toml` in the platform config directory)
//! 3. Environment variables prefixed with `HAZREG_` (`__` separates nested keys)
//! 4. Command-line flags, applied by [`Config::apply_source_args`] and friends
//!
//! The inline seed table lives here too, so the demo dataset is an explicit
//! value handed to the inline source rather than global state.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{IndexArgs, ServeArgs, SourceArgs, SourceMode};
use crate::source::SeedTable;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "HAZREG_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to
    pub host: IpAddr,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Page heading and `<title>`
    pub title: String,
    /// Which record source to serve
    pub source: SourceMode,
    /// CSV file for spreadsheet mode
    pub spreadsheet: PathBuf,
    /// PDF directory for sds mode
    pub document_root: PathBuf,
    /// Index cache file for sds mode
    pub index_cache: PathBuf,
    /// Records for inline mode
    pub seed: SeedTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            title: "Hazardous Materials Register".to_string(),
            source: SourceMode::Inline,
            spreadsheet: PathBuf::from("hazmat.csv"),
            document_root: PathBuf::from("sds"),
            index_cache: PathBuf::from("sds_index.csv"),
            seed: SeedTable::default(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `path` must exist; the default platform path is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any layer fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                anyhow::ensure!(p.is_file(), "Config file not found: {}", p.display());
                Some(p.to_path_buf())
            }
            None => Self::default_path().filter(|p| p.is_file()),
        };

        if let Some(file) = &file {
            log::debug!("Loading config file {}", file.display());
        }
        Self::figment(file.as_deref())
            .extract()
            .context("Invalid configuration")
    }

    /// Build the layered provider chain without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "hazreg", "hazreg").map(|d| d.config_dir().join("config.toml"))
    }

    /// Socket address for the HTTP server.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Apply source-selection flags.
    pub fn apply_source_args(&mut self, args: &SourceArgs) {
        if let Some(source) = args.source {
            self.source = source;
        }
        if let Some(path) = &args.spreadsheet {
            self.spreadsheet.clone_from(path);
        }
        if let Some(dir) = &args.document_root {
            self.document_root.clone_from(dir);
        }
        if let Some(path) = &args.index_cache {
            self.index_cache.clone_from(path);
        }
    }

    /// Apply `serve` flags.
    pub fn apply_serve_args(&mut self, args: &ServeArgs) {
        if let Some(host) = args.host {
            self.host = host;
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        self.apply_source_args(&args.source);
    }

    /// Apply `index` flags.
    pub fn apply_index_args(&mut self, args: &IndexArgs) {
        if let Some(dir) = &args.document_root {
            self.document_root.clone_from(dir);
        }
        if let Some(path) = &args.index_cache {
            self.index_cache.clone_from(path);
        }
    }
}
