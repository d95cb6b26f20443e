//! hazreg - Hazardous Materials Register
//!
//! Serves a searchable HTML register of hazardous-material records taken from
//! an inline seed table, a CSV spreadsheet, or an indexed directory of PDF
//! safety data sheets.

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod output;
pub mod resolve;
pub mod server;
pub mod source;
pub mod table;

use std::io::{self, Write};

use anyhow::{Context, Result};
use yansi::Paint;

use cli::{Cli, Commands, ExportArgs, ExportFormat, IndexArgs};
use config::Config;
use error::ExitCode;
use index::{CacheState, IndexCache};
use output::JsonOutput;

/// Run the command described by `cli`.
///
/// # Errors
///
/// Returns any configuration, source or server error, with context.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => {
            config.apply_serve_args(&args);
            server::run(&config)?;
        }
        Commands::Index(args) => {
            config.apply_index_args(&args);
            run_index(&config, &args, io::stdout().lock())?;
        }
        Commands::Export(args) => {
            config.apply_source_args(&args.source);
            run_export(&config, &args, io::stdout().lock())?;
        }
    }
    Ok(ExitCode::Success)
}

/// Build, rebuild or report on the SDS index cache.
///
/// # Errors
///
/// Returns scan or cache errors, or a write error on `out`.
pub fn run_index<W: Write>(config: &Config, args: &IndexArgs, mut out: W) -> Result<()> {
    let cache = IndexCache::new(&config.index_cache);

    if args.status {
        let state = cache.state();
        writeln!(out, "Cache:  {}", cache.path().display())?;
        match state {
            CacheState::Built => {
                let rows = cache.read().context("Failed to read index cache")?.len();
                writeln!(out, "State:  {}", state.green().bold())?;
                writeln!(out, "Rows:   {rows}")?;
                if let Some(written) = cache.last_written() {
                    writeln!(out, "Written: {}", written.format("%Y-%m-%d %H:%M:%S"))?;
                }
            }
            CacheState::Missing => {
                writeln!(out, "State:  {}", state.yellow().bold())?;
            }
        }
        return Ok(());
    }

    if args.rebuild {
        cache.invalidate()?;
    }

    let rows = match cache.state() {
        CacheState::Built => {
            let rows = cache.read().context("Failed to read index cache")?.len();
            writeln!(
                out,
                "{} cache already built ({rows} entries); use --rebuild to rescan",
                "Skipped:".yellow().bold()
            )?;
            return Ok(());
        }
        CacheState::Missing => cache
            .rebuild(&config.document_root)
            .with_context(|| format!("Failed to index {}", config.document_root.display()))?
            .len(),
    };

    writeln!(
        out,
        "{} {rows} documents -> {}",
        "Indexed".green().bold(),
        cache.path().display()
    )?;
    Ok(())
}

/// Print the configured source's table.
///
/// # Errors
///
/// Returns source errors or a write error on `out`.
pub fn run_export<W: Write>(config: &Config, args: &ExportArgs, mut out: W) -> Result<()> {
    let table = source::from_config(config)
        .load()
        .context("Failed to load records")?;

    match args.format {
        ExportFormat::Csv => table.write_csv(&mut out)?,
        ExportFormat::Json => JsonOutput::new(&config.title, &table).write_to(&mut out)?,
    }
    out.flush()?;
    Ok(())
}
