//! Recognition of progress lines in VCS diagnostic output

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// A progress line recognized by [`parse_line`], before begin/continue
/// annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub operation: String,
    pub current: u64,
    pub total: u64,
    pub detail: String,
}

/// `Receiving objects:  42% (21/50), 1.20 MiB | 2.00 MiB/s`
fn relative() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:remote: )?(?P<label>[\w\s]+):\s+(?P<percent>\d+)% \((?P<current>\d+)/(?P<total>\d+)\)(?P<detail>.*)",
        )
        .expect("relative progress pattern is valid")
    })
}

/// `Enumerating objects: 1234, done.`
fn absolute() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:remote: )?(?P<label>[\w\s]+):\s+(?P<current>\d+)(?P<detail>.*)")
            .expect("absolute progress pattern is valid")
    })
}

/// Classify one line of output. Returns `None` for anything that isn't a
/// progress report.
///
/// The percentage-qualified form is tried before the bare count form, so
/// `Compressing objects: 50% (5/10)` reports `5/10` rather than a count of 50.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    if let Some(caps) = relative().captures(line) {
        return Some(ParsedLine {
            operation: caps["label"].trim().to_string(),
            current: number(&caps, "current"),
            total: number(&caps, "total"),
            detail: caps["detail"].to_string(),
        });
    }

    let caps = absolute().captures(line)?;
    Some(ParsedLine {
        operation: caps["label"].trim().to_string(),
        current: number(&caps, "current"),
        total: 0,
        detail: caps["detail"].to_string(),
    })
}

// `\d` also matches non-ASCII digits, and counts can overflow; either way the
// field reads as zero instead of discarding the line.
fn number(caps: &Captures<'_>, name: &str) -> u64 {
    caps.name(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
