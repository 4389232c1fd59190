//! Valet proxy listing.
//!
//! Valet writes one nginx file per domain under `Nginx/`; a proxy's file
//! carries a `proxy_pass` directive pointing at its target. Only that one
//! line is read here; the nginx grammar itself is out of scope.

use crate::valet::config::ValetConfig;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// A Valet-managed reverse proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValetProxy {
    pub domain: String,
    pub tld: String,
    pub target: String,
    pub secured: bool,
}

impl ValetProxy {
    pub fn url(&self) -> String {
        let scheme = if self.secured { "https" } else { "http" };
        format!("{scheme}://{}.{}", self.domain, self.tld)
    }
}

/// List proxies from the Valet Nginx directory, sorted by domain.
pub fn list_proxies(config: &ValetConfig, valet_dir: &Path) -> Result<Vec<ValetProxy>> {
    let mut proxies = Vec::new();
    let nginx_dir = valet_dir.join("Nginx");

    let Ok(entries) = fs::read_dir(&nginx_dir) else {
        return Ok(proxies);
    };

    let suffix = format!(".{}", config.tld);
    for entry in entries.flatten() {
        let file = entry.file_name().to_string_lossy().into_owned();
        if file.starts_with('.') {
            continue;
        }
        let Some(domain) = file.strip_suffix(&suffix) else {
            continue;
        };
        let Ok(contents) = fs::read_to_string(entry.path()) else {
            continue;
        };
        // Site configs have no proxy_pass; those are not proxies.
        let Some(target) = proxy_target(&contents) else {
            continue;
        };

        let secured =
            ValetConfig::certificate_key(valet_dir, domain, &config.tld).exists();
        proxies.push(ValetProxy {
            domain: domain.to_string(),
            tld: config.tld.clone(),
            target,
            secured,
        });
    }

    proxies.sort_by(|a, b| a.domain.cmp(&b.domain));
    Ok(proxies)
}

/// Extract the target of the first `proxy_pass` directive.
fn proxy_target(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let trimmed = line.trim();
        let rest = trimmed.strip_prefix("proxy_pass")?;
        let target = rest.trim().trim_end_matches(';').trim();
        (!target.is_empty()).then(|| target.to_string())
    })
}
