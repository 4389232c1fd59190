//! PHP version catalog.
//!
//! Joins three sources into the formula list the CLI and orchestrator work
//! from: the supported-version table, the installed snapshot, and (when
//! requested) Homebrew's outdated report.

use crate::brew::formula::PhpFormula;
use crate::paths::Paths;
use crate::php::environment::PhpEnvironment;
use crate::shell::Shell;
use anyhow::Result;
use serde::Deserialize;
use std::sync::Arc;

/// Short versions the tap can provide, oldest first.
pub const SUPPORTED_VERSIONS: &[&str] = &[
    "7.0", "7.1", "7.2", "7.3", "7.4", "8.0", "8.1", "8.2", "8.3", "8.4", "8.5",
];

/// Versions considered experimental/pre-release.
pub const EXPERIMENTAL_VERSIONS: &[&str] = &["8.5"];

/// `brew outdated --json --formulae` payload.
#[derive(Debug, Deserialize)]
pub struct OutdatedFormulae {
    #[serde(default)]
    pub formulae: Vec<OutdatedFormula>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutdatedFormula {
    pub name: String,
    #[serde(default)]
    pub installed_versions: Vec<String>,
    pub current_version: String,
}

/// Seam for loading the version catalog, so callers can be exercised with
/// canned data instead of a live `brew`.
pub trait FormulaeHandler {
    fn load_php_versions(&self, env: &PhpEnvironment, load_outdated: bool)
    -> Result<Vec<PhpFormula>>;
}

/// Production handler backed by `brew`.
pub struct BrewFormulaeHandler {
    shell: Arc<dyn Shell>,
}

impl BrewFormulaeHandler {
    pub fn new(shell: Arc<dyn Shell>) -> Self {
        Self { shell }
    }

    /// Update Homebrew and fetch its outdated report, filtered to PHP.
    ///
    /// Lenient: a failing query or unparseable payload yields an empty
    /// report rather than failing the whole listing.
    fn query_outdated(&self) -> Vec<OutdatedFormula> {
        let brew = Paths::brew();
        let command = format!("{brew} update >/dev/null && {brew} outdated --json --formulae");

        let out = match self.shell.pipe(&command) {
            Ok(out) if out.success() => out,
            _ => {
                tracing::warn!("could not load outdated formulae from brew");
                return Vec::new();
            }
        };

        match serde_json::from_str::<OutdatedFormulae>(&out.out) {
            Ok(report) => report
                .formulae
                .into_iter()
                .filter(|f| f.name.starts_with("php"))
                .collect(),
            Err(e) => {
                tracing::warn!("unparseable brew outdated payload: {e}");
                Vec::new()
            }
        }
    }
}

impl FormulaeHandler for BrewFormulaeHandler {
    fn load_php_versions(
        &self,
        env: &PhpEnvironment,
        load_outdated: bool,
    ) -> Result<Vec<PhpFormula>> {
        let outdated = if load_outdated {
            self.query_outdated()
        } else {
            Vec::new()
        };
        Ok(build_catalog(env, &outdated))
    }
}

/// Assemble the formula list, newest version first.
pub fn build_catalog(env: &PhpEnvironment, outdated: &[OutdatedFormula]) -> Vec<PhpFormula> {
    let mut catalog: Vec<PhpFormula> = SUPPORTED_VERSIONS
        .iter()
        .map(|version| {
            let name = if env.alias() == Some(*version) {
                "php".to_string()
            } else {
                format!("php@{version}")
            };
            let installed_version = env
                .installations()
                .get(*version)
                .map(|i| i.version.to_string());
            let upgrade_version = installed_version.as_ref().and_then(|full| {
                outdated
                    .iter()
                    .find(|f| f.installed_versions.contains(full))
                    .map(|f| f.current_version.clone())
            });

            PhpFormula {
                name,
                display_name: format!("PHP {version}"),
                installed_version,
                upgrade_version,
                prerelease: EXPERIMENTAL_VERSIONS.contains(version),
            }
        })
        .collect();

    catalog.sort_by(|a, b| b.display_name.cmp(&a.display_name));
    catalog
}
