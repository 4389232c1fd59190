//! Valet site listing.
//!
//! Every subdirectory of a parked path is a served site; a site is secured
//! when Valet has issued a certificate key for its domain.

use crate::paths::Paths;
use crate::valet::config::ValetConfig;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A Valet-served site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValetSite {
    pub name: String,
    pub path: PathBuf,
    pub tld: String,
    pub secured: bool,
}

impl ValetSite {
    pub fn url(&self) -> String {
        let scheme = if self.secured { "https" } else { "http" };
        format!("{scheme}://{}.{}", self.name, self.tld)
    }
}

/// List sites from all parked paths, sorted by name.
pub fn list_sites(config: &ValetConfig, valet_dir: &Path) -> Result<Vec<ValetSite>> {
    let mut sites = Vec::new();

    for parked in &config.paths {
        let parked = expand_home(parked);
        let Ok(entries) = fs::read_dir(&parked) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let secured =
                ValetConfig::certificate_key(valet_dir, &name, &config.tld).exists();
            sites.push(ValetSite {
                name,
                path,
                tld: config.tld.clone(),
                secured,
            });
        }
    }

    sites.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sites)
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => Paths::home().join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(paths: Vec<String>) -> ValetConfig {
        ValetConfig {
            tld: "test".to_string(),
            paths,
            loopback: None,
        }
    }

    #[test]
    fn lists_parked_directories_as_sites() {
        let parked = tempfile::tempdir().unwrap();
        let valet = tempfile::tempdir().unwrap();
        for site in ["blog", "api", ".hidden"] {
            fs::create_dir(parked.path().join(site)).unwrap();
        }
        fs::write(parked.path().join("notes.txt"), "").unwrap();

        let config = config(vec![parked.path().display().to_string()]);
        let sites = list_sites(&config, valet.path()).unwrap();

        let names: Vec<&str> = sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["api", "blog"]);
        assert!(!sites[0].secured);
    }

    #[test]
    fn secured_site_is_detected_from_certificate_key() {
        let parked = tempfile::tempdir().unwrap();
        let valet = tempfile::tempdir().unwrap();
        fs::create_dir(parked.path().join("shop")).unwrap();
        fs::create_dir_all(valet.path().join("Certificates")).unwrap();
        fs::write(valet.path().join("Certificates/shop.test.key"), "").unwrap();

        let config = config(vec![parked.path().display().to_string()]);
        let sites = list_sites(&config, valet.path()).unwrap();
        assert!(sites[0].secured);
        assert_eq!(sites[0].url(), "https://shop.test");
    }

    #[test]
    fn missing_parked_path_is_skipped() {
        let valet = tempfile::tempdir().unwrap();
        let config = config(vec!["/nonexistent/Sites".to_string()]);
        assert!(list_sites(&config, valet.path()).unwrap().is_empty());
    }
}
