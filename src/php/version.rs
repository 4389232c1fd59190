//! PHP version numbers.
//!
//! Versions come from messy places (`php -v` banners, directory names,
//! Homebrew JSON), so parsing scans for the first `major.minor[.patch]`
//! group rather than requiring a clean string.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not parse a version number from '{input}'")]
pub struct VersionParseError {
    pub input: String,
}

/// A `major.minor.patch` PHP version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionNumber {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl VersionNumber {
    /// Parse the first version group found in `text`.
    ///
    /// Tolerates leading noise (`PHP 8.1.17 (cli)`) and a missing patch
    /// component (`8.1` parses as `8.1.0`). At least `major.minor` is
    /// required.
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let err = || VersionParseError {
            input: text.to_string(),
        };

        let start = text.find(|c: char| c.is_ascii_digit()).ok_or_else(err)?;
        let run: String = text[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let run = run.trim_end_matches('.');

        let mut parts = run.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(err)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(err)?;
        let patch = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

        Ok(Self {
            major,
            minor,
            patch,
        })
    }

    /// The `major.minor` identifier used to address versioned formulae.
    pub fn short(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_version() {
        let v = VersionNumber::parse("8.1.17").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (8, 1, 17));
        assert_eq!(v.short(), "8.1");
    }

    #[test]
    fn parses_php_banner() {
        let v = VersionNumber::parse("PHP 8.2.3 (cli) (built: Feb 14 2023)").unwrap();
        assert_eq!(v.to_string(), "8.2.3");
    }

    #[test]
    fn missing_patch_defaults_to_zero() {
        let v = VersionNumber::parse("7.4").unwrap();
        assert_eq!(v.to_string(), "7.4.0");
    }

    #[test]
    fn tolerates_suffix_noise() {
        let v = VersionNumber::parse("8.3.0-dev").unwrap();
        assert_eq!(v.to_string(), "8.3.0");
    }

    #[test]
    fn rejects_versionless_text() {
        assert!(VersionNumber::parse("no version here").is_err());
        assert!(VersionNumber::parse("8").is_err());
        assert!(VersionNumber::parse("").is_err());
    }
}
