//! Filesystem locations for Homebrew, PHP and Valet.
//!
//! Homebrew lives under `/opt/homebrew` on Apple Silicon and `/usr/local`
//! on Intel; everything else derives from whichever prefix actually has a
//! `brew` binary.

use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Resolved filesystem locations.
pub struct Paths;

impl Paths {
    /// The Homebrew installation prefix.
    pub fn homebrew_prefix() -> PathBuf {
        if Path::new("/opt/homebrew/bin/brew").exists() {
            PathBuf::from("/opt/homebrew")
        } else {
            PathBuf::from("/usr/local")
        }
    }

    /// Full path to the `brew` binary, as a string for command composition.
    pub fn brew() -> String {
        Self::homebrew_prefix()
            .join("bin/brew")
            .display()
            .to_string()
    }

    /// The `opt/` directory containing one entry per installed formula.
    pub fn opt() -> PathBuf {
        Self::homebrew_prefix().join("opt")
    }

    /// Root of third-party tap checkouts.
    ///
    /// A tap `user/repo` lives at `<taps>/user/homebrew-repo`.
    pub fn taps() -> PathBuf {
        Self::homebrew_prefix().join("Homebrew/Library/Taps")
    }

    /// Directory of a specific tap's formula definitions.
    pub fn tap_formula_dir(tap: &str) -> PathBuf {
        let mut parts = tap.splitn(2, '/');
        let user = parts.next().unwrap_or_default();
        let repo = parts.next().unwrap_or_default();
        Self::taps().join(user).join(format!("homebrew-{repo}/Formula"))
    }

    /// The `valet` binary (global composer install, falling back to PATH).
    pub fn valet() -> String {
        let composer = Self::home().join(".composer/vendor/bin/valet");
        if composer.exists() {
            composer.display().to_string()
        } else {
            "valet".to_string()
        }
    }

    /// Valet's configuration directory (`~/.config/valet`).
    pub fn valet_config_dir() -> PathBuf {
        Self::home().join(".config/valet")
    }

    /// php.ini location for a given short version under the Homebrew prefix.
    pub fn php_ini(short: &str) -> PathBuf {
        Self::homebrew_prefix().join(format!("etc/php/{short}/php.ini"))
    }

    /// The user's home directory.
    pub fn home() -> PathBuf {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}
