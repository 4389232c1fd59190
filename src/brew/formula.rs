//! PHP formula model.

use crate::php::version::VersionNumber;
use serde::{Deserialize, Serialize};

/// A PHP formula as Homebrew knows it, joined with local install state.
///
/// Constructed at plan-build time from the catalog query; immutable
/// thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhpFormula {
    /// Formula name (`"php"` or `"php@8.1"`).
    pub name: String,
    /// Human-facing name (`"PHP 8.1"`).
    pub display_name: String,
    /// Full installed version, when installed.
    pub installed_version: Option<String>,
    /// Version an upgrade would move to, when one is pending.
    pub upgrade_version: Option<String>,
    /// Experimental/pre-release version.
    pub prerelease: bool,
}

impl PhpFormula {
    pub fn is_installed(&self) -> bool {
        self.installed_version.is_some()
    }

    pub fn has_upgrade(&self) -> bool {
        self.upgrade_version.is_some()
    }

    /// True when upgrading this formula makes the installed version no
    /// longer independently addressable.
    ///
    /// Only the umbrella `php` formula behaves this way: when its pending
    /// upgrade crosses a short-version boundary, the currently-installed
    /// version collapses into the umbrella and can only be kept by
    /// explicitly installing `php@<short>`.
    pub fn unavailable_after_upgrade(&self) -> bool {
        if self.name != "php" {
            return false;
        }
        let (Some(installed), Some(upgrade)) =
            (&self.installed_version, &self.upgrade_version)
        else {
            return false;
        };
        match (VersionNumber::parse(installed), VersionNumber::parse(upgrade)) {
            (Ok(from), Ok(to)) => from.short() != to.short(),
            _ => false,
        }
    }

    /// Short version of the installed build, when parseable.
    pub fn installed_short(&self) -> Option<String> {
        let installed = self.installed_version.as_deref()?;
        VersionNumber::parse(installed).ok().map(|v| v.short())
    }
}
