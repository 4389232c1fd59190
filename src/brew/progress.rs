//! Map raw `brew` output lines onto a normalized progress model.
//!
//! Homebrew interleaves several kinds of `==>` markers in one run; the
//! table below is evaluated in order because a single line can contain
//! multiple markers and the more diagnostic one must win. The one special
//! case: downloading a manifest is really a metadata fetch, so it reports
//! the fetch checkpoint, not the download one.

/// Map one output line to an optional `(fraction, message)` pair.
///
/// Pure function; returns `None` for lines with no known marker.
pub fn report(line: &str) -> Option<(f64, String)> {
    if line.contains("==> Downloading") && line.contains("/manifests/") {
        return Some((0.10, "Fetching...".to_string()));
    }
    if line.contains("==> Summary") {
        return Some((0.90, "Wrapping up...".to_string()));
    }
    if line.contains("==> Pouring") {
        return Some((0.80, with_subject("Pouring...", line, "==> Pouring")));
    }
    if line.contains("==> Installing") {
        return Some((0.60, with_subject("Installing...", line, "==> Installing")));
    }
    if line.contains("==> Downloading") {
        return Some((0.25, with_subject("Downloading...", line, "==> Downloading")));
    }
    if line.contains("==> Fetching") {
        return Some((0.10, "Fetching...".to_string()));
    }
    None
}

/// Append the marker's subject (the following token) when one exists.
///
/// Extraction failure just omits the suffix; it never fails the report.
fn with_subject(base: &str, line: &str, marker: &str) -> String {
    match subject_after(line, marker) {
        Some(subject) => format!("{base} ({subject})"),
        None => base.to_string(),
    }
}

/// The whitespace-delimited token immediately following `marker`.
fn subject_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = line.split_once(marker)?;
    rest.split_whitespace().next()
}
