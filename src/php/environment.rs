//! Installed PHP versions and the active selection.
//!
//! The environment holds a snapshot of installed versions keyed by short
//! version (`"8.1"`). The snapshot is re-derived fresh after every mutating
//! operation and always replaced wholesale, never patched in place.

use crate::error::PhpupError;
use crate::paths::Paths;
use crate::php::version::VersionNumber;
use crate::shell::Shell;
use anyhow::{Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One installed PHP version.
#[derive(Debug, Clone)]
pub struct PhpInstallation {
    pub version: VersionNumber,
    /// False when the binary exists but fails its functional check.
    pub healthy: bool,
}

/// The machine's PHP environment as seen through Homebrew.
pub struct PhpEnvironment {
    shell: Arc<dyn Shell>,
    /// Homebrew prefix whose `opt/` dir is scanned for installations.
    prefix: PathBuf,
    installations: BTreeMap<String, PhpInstallation>,
    /// Short version the umbrella `php` formula currently aliases.
    alias: Option<String>,
}

impl PhpEnvironment {
    pub fn new(shell: Arc<dyn Shell>, prefix: PathBuf) -> Self {
        Self {
            shell,
            prefix,
            installations: BTreeMap::new(),
            alias: None,
        }
    }

    /// Build an environment and populate it from the system.
    pub fn detect(shell: Arc<dyn Shell>, prefix: PathBuf) -> Result<Self> {
        let mut env = Self::new(shell, prefix);
        env.refresh()?;
        env.determine_alias();
        Ok(env)
    }

    pub fn installations(&self) -> &BTreeMap<String, PhpInstallation> {
        &self.installations
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Re-derive the installed snapshot from `<prefix>/opt`.
    ///
    /// Each `php@x.y` entry with a binary is probed by running it; a failing
    /// probe marks the installation unhealthy. The umbrella `php` entry is
    /// folded in under its own short version.
    pub fn refresh(&mut self) -> Result<()> {
        let mut found = BTreeMap::new();
        let opt = self.prefix.join("opt");

        if opt.is_dir() {
            for entry in fs::read_dir(&opt)? {
                let entry = entry?;
                let name = entry.file_name().to_string_lossy().into_owned();
                let Some(short) = name.strip_prefix("php@") else {
                    continue;
                };
                if VersionNumber::parse(&format!("{short}.0")).is_err() {
                    continue;
                }
                let binary = entry.path().join("bin/php");
                if !binary.exists() {
                    continue;
                }
                if let Some((short, install)) = self.probe(&binary, Some(short)) {
                    found.insert(short, install);
                }
            }

            let umbrella = opt.join("php/bin/php");
            if umbrella.exists() {
                if let Some((short, install)) = self.probe(&umbrella, None) {
                    found.entry(short).or_insert(install);
                }
            }
        }

        self.installations = found;
        Ok(())
    }

    /// Run a PHP binary to learn its full version and health.
    fn probe(&self, binary: &Path, fallback_short: Option<&str>) -> Option<(String, PhpInstallation)> {
        let query = format!("{} -r 'echo PHP_VERSION;'", binary.display());
        let healthy_version = match self.shell.pipe(&query) {
            Ok(out) if out.success() => VersionNumber::parse(&out.out).ok(),
            _ => None,
        };

        match healthy_version {
            Some(version) => Some((
                version.short(),
                PhpInstallation {
                    version,
                    healthy: true,
                },
            )),
            None => {
                // Binary present but broken; keep it in the snapshot so the
                // repair step can target it. Without a short version from
                // the directory name there is nothing to address.
                let short = fallback_short?;
                let version = VersionNumber::parse(&format!("{short}.0")).ok()?;
                Some((
                    short.to_string(),
                    PhpInstallation {
                        version,
                        healthy: false,
                    },
                ))
            }
        }
    }

    /// Resolve which short version the umbrella `php` formula points at.
    ///
    /// Lenient: resolution failure leaves the alias unset.
    pub fn determine_alias(&mut self) {
        self.alias = self.query_alias();
    }

    fn query_alias(&self) -> Option<String> {
        let out = self
            .shell
            .pipe(&format!("{} info php --json", Paths::brew()))
            .ok()?;
        if !out.success() {
            return None;
        }
        let parsed: serde_json::Value = serde_json::from_str(&out.out).ok()?;
        let stable = parsed.get(0)?.get("versions")?.get("stable")?.as_str()?;
        VersionNumber::parse(stable).ok().map(|v| v.short())
    }

    /// The short version of the currently linked `php` binary.
    pub fn current_version(&self) -> Option<String> {
        let binary = self.prefix.join("bin/php");
        let out = self
            .shell
            .pipe(&format!("{} -r 'echo PHP_VERSION;'", binary.display()))
            .ok()?;
        if !out.success() {
            return None;
        }
        VersionNumber::parse(&out.out).ok().map(|v| v.short())
    }

    /// Formula name addressing a short version: the umbrella when it is the
    /// current alias, the versioned name otherwise.
    pub fn formula_for(&self, short: &str) -> String {
        if self.alias.as_deref() == Some(short) {
            "php".to_string()
        } else {
            format!("php@{short}")
        }
    }

    /// Reinstall targets for every unhealthy installation.
    pub fn repair_targets(&self) -> Vec<String> {
        self.installations
            .iter()
            .filter(|(_, install)| !install.healthy)
            .map(|(short, _)| self.formula_for(short))
            .collect()
    }

    /// Switch the active PHP version: unlink everything installed, then
    /// link the target formula.
    pub fn switch_to(&self, short: &str) -> Result<()> {
        if !self.installations.contains_key(short) {
            return Err(PhpupError::VersionNotInstalled {
                version: short.to_string(),
            }
            .into());
        }

        for installed in self.installations.keys() {
            let formula = self.formula_for(installed);
            let _ = self
                .shell
                .pipe(&format!("{} unlink {}", Paths::brew(), formula));
        }

        let formula = self.formula_for(short);
        let out = self
            .shell
            .pipe(&format!("{} link --force --overwrite {}", Paths::brew(), formula))?;
        if !out.success() {
            bail!("Failed to link {formula}: {}", out.err.trim());
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn set_state(
        &mut self,
        installations: BTreeMap<String, PhpInstallation>,
        alias: Option<String>,
    ) {
        self.installations = installations;
        self.alias = alias;
    }
}
