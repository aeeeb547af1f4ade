//! Console status lines for each stage, outcome and the final summary.

use std::io::{self, Write};
use uif_core::batch::BatchSummary;
use uif_core::fetcher::{FetchObserver, FetchOutcome, FetchRequest, FetchStage};

use super::prompt::rule;

/// Prints one line per visible stage and per outcome. Write errors are ignored:
/// losing a status line must not stop a download.
pub struct ConsoleReporter<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }
}

impl<W: Write> FetchObserver for ConsoleReporter<'_, W> {
    fn on_url_start(&mut self, index: usize, total: usize, url: &str) {
        let _ = writeln!(self.out, "\n📦 Processing URL {index} of {total}: {url}");
    }

    fn on_stage(&mut self, stage: &FetchStage<'_>) {
        let _ = match stage {
            FetchStage::DirectoryReady(dir) => {
                writeln!(self.out, "✓ Ensuring directory '{}' exists", dir.display())
            }
            FetchStage::Connecting { host } => writeln!(self.out, "🔗 Connecting to {host}..."),
            _ => Ok(()),
        };
    }

    fn on_outcome(&mut self, request: &FetchRequest, outcome: &FetchOutcome) {
        let _ = match outcome {
            FetchOutcome::Saved(name) => {
                let path = request.target_dir.join(name);
                writeln!(self.out, "✓ Successfully fetched: {name}")
                    .and_then(|()| writeln!(self.out, "✓ Image saved to {}", path.display()))
            }
            FetchOutcome::Skipped(existing) => writeln!(
                self.out,
                "⚠️  Image already exists as '{existing}' (duplicate content)"
            ),
            FetchOutcome::Failed(e) => writeln!(self.out, "✗ {}: {}", e.label(), e),
        };
    }
}

pub fn print_no_input<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "No URL provided. Exiting.")
}

pub fn print_summary<W: Write>(out: &mut W, summary: &BatchSummary) -> io::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "Download Summary:")?;
    writeln!(out, "Attempted: {}", summary.attempted)?;
    writeln!(out, "Successful: {}", summary.successful)?;
    writeln!(out, "Failed: {}", summary.failed())?;

    if summary.successful > 0 {
        writeln!(out, "\n🌟 Connection strengthened. Community enriched.")?;
        writeln!(out, "Thank you for sharing in the spirit of Ubuntu.")?;
    } else {
        writeln!(
            out,
            "\n💭 Even in absence, community exists. Please try again with different URLs."
        )?;
    }
    writeln!(out, "{}", rule())
}
