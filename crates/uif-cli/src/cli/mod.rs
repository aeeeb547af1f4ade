//! CLI for the uif image fetcher.
//!
//! URLs are never taken from arguments: they are read from an interactive
//! prompt. Flags only override configuration.

mod console;
mod prompt;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use uif_core::batch::run_batch;
use uif_core::config::{self, FetcherConfig};

use console::ConsoleReporter;

/// Top-level CLI for the uif image fetcher.
#[derive(Debug, Parser)]
#[command(name = "uif", version)]
#[command(about = "Fetch images from URLs into a local folder, skipping duplicates", long_about = None)]
pub struct Cli {
    /// Directory to save images into (overrides config; default Fetched_Images).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Network timeout in seconds (overrides config; default 15).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, cfg: &mut FetcherConfig) {
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = secs;
        }
    }
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = match config::load_or_init() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config unavailable ({:#}), using defaults", e);
            FetcherConfig::default()
        }
    };
    cli.apply(&mut cfg);
    tracing::debug!("effective config: {:?}", cfg);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    prompt::print_banner(&mut out)?;

    let Some(line) = prompt::read_urls(&mut io::stdin().lock(), &mut out)? else {
        console::print_no_input(&mut out)?;
        return Ok(());
    };

    let mut reporter = ConsoleReporter::new(&mut out);
    let summary = run_batch(&line, &cfg, &mut reporter);
    console::print_summary(&mut out, &summary)?;
    Ok(())
}

#[cfg(test)]
mod tests;
