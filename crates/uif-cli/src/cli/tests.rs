//! CLI parse and console output tests.

use super::console::{self, ConsoleReporter};
use super::prompt;
use super::Cli;
use clap::Parser;
use std::path::PathBuf;
use uif_core::batch::BatchSummary;
use uif_core::config::FetcherConfig;
use uif_core::error::{FetchError, ValidationError};
use uif_core::fetcher::{FetchObserver, FetchOutcome, FetchRequest, FetchStage};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn cli_parse_no_flags() {
    let cli = parse(&["uif"]);
    assert!(cli.output_dir.is_none());
    assert!(cli.timeout.is_none());

    let mut cfg = FetcherConfig::default();
    cli.apply(&mut cfg);
    assert_eq!(cfg, FetcherConfig::default());
}

#[test]
fn cli_parse_overrides() {
    let cli = parse(&["uif", "--output-dir", "/tmp/pics", "--timeout", "30"]);
    let mut cfg = FetcherConfig::default();
    cli.apply(&mut cfg);
    assert_eq!(cfg.output_dir, PathBuf::from("/tmp/pics"));
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn cli_rejects_positional_urls() {
    assert!(Cli::try_parse_from(["uif", "https://example.com/a.png"]).is_err());
}

#[test]
fn read_urls_trims_line() {
    let mut input = "  https://a.example/x.png, https://b.example/y.png \n".as_bytes();
    let mut out = Vec::new();
    let line = prompt::read_urls(&mut input, &mut out).unwrap();
    assert_eq!(
        line.as_deref(),
        Some("https://a.example/x.png, https://b.example/y.png")
    );
    assert!(output(out).contains("Please enter the image URL"));
}

#[test]
fn read_urls_blank_or_closed() {
    let mut out = Vec::new();
    assert_eq!(prompt::read_urls(&mut "   \n".as_bytes(), &mut out).unwrap(), None);
    assert_eq!(prompt::read_urls(&mut "".as_bytes(), &mut out).unwrap(), None);
}

#[test]
fn reporter_prints_stages_and_outcomes() {
    let mut buf = Vec::new();
    let request = FetchRequest::new("https://img.example/cat.png", "Fetched_Images");
    {
        let mut reporter = ConsoleReporter::new(&mut buf);
        reporter.on_url_start(1, 2, &request.url);
        reporter.on_stage(&FetchStage::DirectoryReady(&request.target_dir));
        reporter.on_stage(&FetchStage::Connecting { host: "img.example" });
        reporter.on_stage(&FetchStage::DedupChecking { bytes: 10 });
        reporter.on_outcome(&request, &FetchOutcome::Saved("cat.png".into()));
        reporter.on_outcome(&request, &FetchOutcome::Skipped("cat.png".into()));
        reporter.on_outcome(
            &request,
            &FetchOutcome::Failed(FetchError::from(ValidationError::InvalidContentType {
                content_type: "text/html".into(),
            })),
        );
    }
    let text = output(buf);
    let expected_saved = format!(
        "✓ Image saved to {}",
        PathBuf::from("Fetched_Images").join("cat.png").display()
    );
    assert!(text.contains("📦 Processing URL 1 of 2: https://img.example/cat.png"));
    assert!(text.contains("✓ Ensuring directory 'Fetched_Images' exists"));
    assert!(text.contains("🔗 Connecting to img.example..."));
    assert!(text.contains("✓ Successfully fetched: cat.png"));
    assert!(text.contains(&expected_saved));
    assert!(text.contains("⚠️  Image already exists as 'cat.png' (duplicate content)"));
    assert!(text.contains("✗ Validation error: URL does not point to an image (Content-Type: text/html)"));
    assert_eq!(text.lines().filter(|l| !l.is_empty()).count(), 7);
}

#[test]
fn summary_with_success() {
    let mut buf = Vec::new();
    let summary = BatchSummary {
        attempted: 3,
        successful: 2,
        skipped: 0,
    };
    console::print_summary(&mut buf, &summary).unwrap();
    let text = output(buf);
    assert!(text.contains("Attempted: 3"));
    assert!(text.contains("Successful: 2"));
    assert!(text.contains("Failed: 1"));
    assert!(text.contains("Connection strengthened"));
}

#[test]
fn summary_without_success() {
    let mut buf = Vec::new();
    let summary = BatchSummary {
        attempted: 1,
        successful: 0,
        skipped: 1,
    };
    console::print_summary(&mut buf, &summary).unwrap();
    let text = output(buf);
    assert!(text.contains("Failed: 1"));
    assert!(text.contains("Even in absence, community exists"));
}
