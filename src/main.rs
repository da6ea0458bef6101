//! Ambler main entry point
//!
//! Scans the command line, then runs one crawl session per seed URL.

use ambler::config::{parse_args, ParsedArgs, DEFAULT_WAIT_SECS};
use ambler::crawler::crawl;
use ambler::storage::{ensure_output_dir, PageStore};
use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Directory fetched pages are saved into, relative to the working dir
const OUTPUT_DIR: &str = "pages";

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("ambler: {e}");
            return ExitCode::FAILURE;
        }
    };

    for warning in &parsed.warnings {
        eprintln!("ambler: {warning}");
    }

    if parsed.config.help {
        print_usage();
    }

    // Help without URLs is a complete invocation
    if parsed.urls.is_empty() {
        return ExitCode::SUCCESS;
    }

    match run(&parsed).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ambler: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(parsed: &ParsedArgs) -> anyhow::Result<()> {
    ensure_output_dir(Path::new(OUTPUT_DIR)).context("could not create the pages directory")?;
    let mut store = PageStore::new(OUTPUT_DIR);

    let reports = crawl(&parsed.urls, &parsed.config, &mut store)
        .await
        .context("could not build the HTTP client")?;

    let attempts: u32 = reports.iter().map(|report| report.attempts).sum();
    tracing::info!(
        seeds = parsed.urls.len(),
        attempts,
        pages_saved = store.pages_written(),
        "crawl finished"
    );

    Ok(())
}

/// Sets up the tracing subscriber; RUST_LOG overrides the default filter
///
/// Diagnostics go to stderr so stdout stays reserved for the progress
/// lines the crawler prints per attempt.
fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ambler=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("ambler {}", env!("CARGO_PKG_VERSION"));
    println!("Fetches pages from a single host, optionally following links.");
    println!();
    println!("Usage: ambler [options] <url>...");
    println!();
    println!("Options:");
    println!("  -n <num>      stop after <num> pages, requires \"-r\"");
    println!("  -r            follow same-host links on fetched pages");
    println!("  -w <seconds>  wait between requests (default {DEFAULT_WAIT_SECS})");
    println!("  -h            show this help text");
}
