//! PHP extension discovery from tap formula filenames.
//!
//! The extensions tap names its formula files `<ext>@<major.minor>.rb`;
//! scanning the checkout's `Formula/` directory is enough to know which
//! extensions exist for which PHP version.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An extension formula available from the extensions tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpExtension {
    pub name: String,
    pub php_version: String,
    pub path: PathBuf,
}

/// Scan a tap's `Formula/` directory, grouping extensions by PHP version.
///
/// Returns an empty map when the tap is not checked out locally.
pub fn from_tap(formula_dir: &Path) -> BTreeMap<String, Vec<PhpExtension>> {
    let mut by_version: BTreeMap<String, Vec<PhpExtension>> = BTreeMap::new();

    let Ok(entries) = fs::read_dir(formula_dir) else {
        return by_version;
    };

    for entry in entries.flatten() {
        let file = entry.file_name().to_string_lossy().into_owned();
        let Some((name, version)) = parse_formula_filename(&file) else {
            continue;
        };
        by_version
            .entry(version.to_string())
            .or_default()
            .push(PhpExtension {
                name: name.to_string(),
                php_version: version.to_string(),
                path: entry.path(),
            });
    }

    for extensions in by_version.values_mut() {
        extensions.sort_by(|a, b| a.name.cmp(&b.name));
    }
    by_version
}

/// Split `xdebug@8.2.rb` into `("xdebug", "8.2")`.
fn parse_formula_filename(file: &str) -> Option<(&str, &str)> {
    let stem = file.strip_suffix(".rb")?;
    let (name, version) = stem.split_once('@')?;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let mut parts = version.split('.');
    let valid = parts.clone().count() == 2
        && parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    valid.then_some((name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_versioned_formula_filenames() {
        assert_eq!(parse_formula_filename("xdebug@8.2.rb"), Some(("xdebug", "8.2")));
        assert_eq!(parse_formula_filename("imagick@7.4.rb"), Some(("imagick", "7.4")));
        assert_eq!(parse_formula_filename("README.md"), None);
        assert_eq!(parse_formula_filename("xdebug.rb"), None);
        assert_eq!(parse_formula_filename("xdebug@dev.rb"), None);
    }

    #[test]
    fn groups_extensions_by_php_version_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for file in ["xdebug@8.2.rb", "apcu@8.2.rb", "xdebug@8.1.rb", "notes.txt"] {
            fs::write(dir.path().join(file), "").unwrap();
        }

        let grouped = from_tap(dir.path());
        assert_eq!(grouped.len(), 2);
        let names: Vec<&str> = grouped["8.2"].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["apcu", "xdebug"]);
    }

    #[test]
    fn missing_tap_dir_yields_empty_map() {
        assert!(from_tap(Path::new("/nonexistent/Formula")).is_empty());
    }
}
