//! Single-URL fetch pipeline.
//!
//! Drives one URL through `Connecting → Validating → DedupChecking →
//! NamingResolving → Writing` and reports exactly one [`FetchOutcome`]. Every
//! error is folded into `FetchOutcome::Failed`; nothing escapes to the caller,
//! so one bad URL never stops a batch.

use crate::config::FetcherConfig;
use crate::dedup::DirectorySnapshot;
use crate::error::FetchError;
use crate::filename::resolve_filename;
use crate::http::{self, HttpOptions, ResponseHead};
use crate::storage;
use crate::validate::validate_head;
use std::fs;
use std::path::{Path, PathBuf};

/// One URL and the directory its image goes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub target_dir: PathBuf,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            target_dir: target_dir.into(),
        }
    }

    /// Request targeting the configured output directory.
    pub fn with_config(url: impl Into<String>, cfg: &FetcherConfig) -> Self {
        Self::new(url, cfg.output_dir.clone())
    }
}

/// Result of one fetch attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Written under this file name.
    Saved(String),
    /// Identical content already present under this file name; nothing written.
    Skipped(String),
    Failed(FetchError),
}

impl FetchOutcome {
    /// Only `Saved` counts as a success; a skipped duplicate does not.
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Saved(_))
    }
}

/// Pipeline state entered, in order.
#[derive(Debug, Clone, Copy)]
pub enum FetchStage<'a> {
    /// Target directory exists (created if it was missing).
    DirectoryReady(&'a Path),
    Connecting { host: &'a str },
    /// Final response head received, about to be validated.
    Validating(&'a ResponseHead),
    DedupChecking { bytes: usize },
    NamingResolving { base_name: &'a str },
    /// Unique path claimed; bytes are being written.
    Writing(&'a Path),
}

impl FetchStage<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FetchStage::DirectoryReady(_) => "directory_ready",
            FetchStage::Connecting { .. } => "connecting",
            FetchStage::Validating(_) => "validating",
            FetchStage::DedupChecking { .. } => "dedup_checking",
            FetchStage::NamingResolving { .. } => "naming_resolving",
            FetchStage::Writing(_) => "writing",
        }
    }
}

/// Receives progress from the pipeline and the batch driver. All methods default to no-ops.
pub trait FetchObserver {
    fn on_stage(&mut self, _stage: &FetchStage<'_>) {}

    /// Batch driver is about to fetch URL number `index` (1-based) of `total`.
    fn on_url_start(&mut self, _index: usize, _total: usize, _url: &str) {}

    fn on_outcome(&mut self, _request: &FetchRequest, _outcome: &FetchOutcome) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {}

/// Fetches one image. Never fails: errors come back as `FetchOutcome::Failed`.
pub fn fetch_image(
    request: &FetchRequest,
    cfg: &FetcherConfig,
    observer: &mut dyn FetchObserver,
) -> FetchOutcome {
    let span = tracing::info_span!("fetch", url = %request.url);
    let _guard = span.enter();

    match run_pipeline(request, cfg, observer) {
        Ok(outcome) => {
            match &outcome {
                FetchOutcome::Saved(name) => tracing::info!(file = %name, "saved"),
                FetchOutcome::Skipped(name) => tracing::info!(existing = %name, "duplicate, skipped"),
                FetchOutcome::Failed(_) => {}
            }
            outcome
        }
        Err(e) => {
            tracing::warn!(kind = e.label(), error = %e, "fetch failed");
            FetchOutcome::Failed(e)
        }
    }
}

fn run_pipeline(
    request: &FetchRequest,
    cfg: &FetcherConfig,
    observer: &mut dyn FetchObserver,
) -> Result<FetchOutcome, FetchError> {
    let dir = request.target_dir.as_path();
    fs::create_dir_all(dir)?;
    report(observer, FetchStage::DirectoryReady(dir));

    let host = host_of(&request.url);
    report(observer, FetchStage::Connecting { host: &host });

    let opts = HttpOptions::from_config(cfg);
    let response = http::get(&request.url, &opts, |head| {
        report(observer, FetchStage::Validating(head));
        validate_head(head, cfg.max_content_length)?;
        Ok(())
    })?;

    report(
        observer,
        FetchStage::DedupChecking {
            bytes: response.body.len(),
        },
    );
    let snapshot = DirectorySnapshot::scan(dir)?;
    if let Some(existing) = snapshot.find_duplicate(&response.body) {
        return Ok(FetchOutcome::Skipped(existing));
    }

    let base_name = resolve_filename(&request.url, &response.head);
    report(
        observer,
        FetchStage::NamingResolving {
            base_name: &base_name,
        },
    );
    let claimed = storage::create_unique(dir, &base_name)?;
    let file_name = claimed.file_name();

    report(observer, FetchStage::Writing(claimed.path()));
    claimed.write_all(&response.body)?;

    Ok(FetchOutcome::Saved(file_name))
}

fn report(observer: &mut dyn FetchObserver, stage: FetchStage<'_>) {
    tracing::debug!(stage = stage.name(), "stage");
    observer.on_stage(&stage);
}

/// Host for display; empty when the URL does not parse (the GET reports why).
fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_default()
}
