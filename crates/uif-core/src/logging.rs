//! Tracing setup for the `uif` binary.
//!
//! Per-stage records go to `$XDG_STATE_HOME/uif/uif.log`; the interactive
//! status lines are the CLI's business. When the log file cannot be opened the
//! caller drops to [`init_logging_stderr`], which only lets warnings through.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const APP_NAME: &str = "uif";
const LOG_FILE_NAME: &str = "uif.log";

/// Where log records end up; decides the filter used when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogTarget {
    File,
    Stderr,
}

impl LogTarget {
    fn default_directives(self) -> &'static str {
        match self {
            LogTarget::File => "info,uif_core=debug,uif_cli=debug",
            LogTarget::Stderr => "warn",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

/// Path of the log file inside `state_dir`.
pub fn log_file_path(state_dir: &Path) -> PathBuf {
    state_dir.join(LOG_FILE_NAME)
}

/// Creates `state_dir` if needed and opens the log file there for appending.
fn open_log_file(state_dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(state_dir)
        .with_context(|| format!("creating log directory {}", state_dir.display()))?;
    let path = log_file_path(state_dir);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    Ok((path, file))
}

/// Installs the global subscriber writing to the XDG state log file.
///
/// Returns the log path. Errors (no usable state dir, subscriber already set)
/// are returned so `main` can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let state_dir = xdg::BaseDirectories::with_prefix(APP_NAME)?.get_state_home();
    let (path, file) = open_log_file(&state_dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(LogTarget::File.filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(path)
}

/// Installs a stderr subscriber at `warn` (unless `RUST_LOG` says otherwise)
/// so log lines do not drown the prompt. A subscriber that is already set wins.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(LogTarget::Stderr.filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
