//! salesdash CLI - Sales metrics to Excel dashboard
//!
//! Reads one JSON document of pre-aggregated sales metrics (stdin by
//! default), writes the dashboard workbook and reports the outcome as a
//! single JSON line on stdout:
//!
//! ```text
//! {"success": true, "file": "dashboard.xlsx"}
//! {"success": false, "error": "..."}
//! ```
//!
//! Exit code 0 on success, 1 on any failure. Logs go to stderr.

mod outcome;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use salesdash_core::{DashboardInput, Renderer};
use salesdash_render::ExcelDashboardRenderer;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::outcome::Outcome;

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(author, version, about = "Sales metrics to Excel dashboard", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Read the input document from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Size chart ranges from the record counts instead of the fixed bounds
    #[arg(long)]
    fit_chart_ranges: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (outcome, code) = match run(&cli) {
        Ok(file) => (Outcome::written(file), ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("error: {err:#}");
            (Outcome::failed(format!("{err:#}")), ExitCode::FAILURE)
        }
    };

    match outcome.to_line() {
        Ok(line) => {
            println!("{line}");
            code
        }
        Err(err) => {
            eprintln!("error: failed to encode outcome: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for the JSON outcome line
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Parse, render, then write the workbook. Returns the output path.
fn run(cli: &Cli) -> Result<String> {
    let input = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            DashboardInput::from_reader(file)
        }
        None => DashboardInput::from_reader(io::stdin().lock()),
    }
    .context("failed to read dashboard input")?;

    debug!(
        products = input.dashboard_data.product_line_sales.len(),
        branches = input.dashboard_data.branch_data.len(),
        months = input.dashboard_data.monthly_data.len(),
        customers = input.dashboard_data.customer_data.len(),
        payments = input.dashboard_data.payment_data.len(),
        "parsed dashboard input"
    );

    let mut renderer = ExcelDashboardRenderer::new();
    if cli.fit_chart_ranges {
        renderer = renderer.fit_chart_ranges();
    }

    // Rendered fully in memory so a render failure never touches the output path
    let bytes = renderer.render(&input).context("failed to build workbook")?;

    let output = input.output_path().to_string();
    write_atomically(Path::new(&output), &bytes).with_context(|| format!("failed to write {output}"))?;
    info!(file = %output, "dashboard written");

    Ok(output)
}

/// Write to a temporary file beside `path`, then rename it into place, so
/// `path` either holds the whole workbook or is left untouched.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn atomic_write_leaves_only_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("dashboard.xlsx");

        write_atomically(&target, b"PK workbook").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"PK workbook");
        assert_eq!(entries(dir.path()), vec!["dashboard.xlsx"]);
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("dashboard.xlsx");
        std::fs::write(&target, b"an older and much longer workbook").unwrap();

        write_atomically(&target, b"new").unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        assert_eq!(entries(dir.path()), vec!["dashboard.xlsx"]);
    }

    #[test]
    fn atomic_write_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("dashboard.xlsx");

        assert!(write_atomically(&target, b"PK").is_err());
        assert!(entries(dir.path()).is_empty());
    }
}
