//! Banner and the single interactive input line.

use std::io::{self, BufRead, Write};

const RULE: &str = "==================================================";

pub fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Welcome to the Ubuntu Image Fetcher")?;
    writeln!(out, "A tool for mindfully collecting images from the web")?;
    writeln!(out, "In the spirit of Ubuntu: 'I am because we are'")?;
    writeln!(out, "{RULE}")
}

/// Prompts for URLs and reads one line. `None` when the line is blank or stdin is closed.
pub fn read_urls<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<String>> {
    write!(
        out,
        "\nPlease enter the image URL (or multiple URLs separated by commas): "
    )?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    Ok((!line.is_empty()).then(|| line.to_string()))
}

pub(super) fn rule() -> &'static str {
    RULE
}
