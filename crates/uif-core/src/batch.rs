//! Batch driver: one input line, many URLs, fetched one after another.

use crate::config::FetcherConfig;
use crate::fetcher::{fetch_image, FetchObserver, FetchOutcome, FetchRequest};

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub successful: usize,
    /// Duplicates; these are part of `failed()` as well.
    pub skipped: usize,
}

impl BatchSummary {
    /// Everything that was not saved, skipped duplicates included.
    pub fn failed(&self) -> usize {
        self.attempted - self.successful
    }

    fn record(&mut self, outcome: &FetchOutcome) {
        self.attempted += 1;
        match outcome {
            FetchOutcome::Saved(_) => self.successful += 1,
            FetchOutcome::Skipped(_) => self.skipped += 1,
            FetchOutcome::Failed(_) => {}
        }
    }
}

/// Splits comma-separated input into trimmed, non-empty URLs.
pub fn split_urls(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Fetches every URL in `input` sequentially into `cfg.output_dir`.
pub fn run_batch(
    input: &str,
    cfg: &FetcherConfig,
    observer: &mut dyn FetchObserver,
) -> BatchSummary {
    let urls = split_urls(input);
    let total = urls.len();
    let mut summary = BatchSummary::default();

    for (i, url) in urls.into_iter().enumerate() {
        observer.on_url_start(i + 1, total, &url);
        let request = FetchRequest::with_config(url, cfg);
        let outcome = fetch_image(&request, cfg, observer);
        observer.on_outcome(&request, &outcome);
        summary.record(&outcome);
    }

    tracing::info!(
        attempted = summary.attempted,
        successful = summary.successful,
        skipped = summary.skipped,
        "batch finished"
    );
    summary
}
