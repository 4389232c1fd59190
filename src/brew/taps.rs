//! Installed-tap tracking and the PHP tap prerequisite check.

use crate::brew::command::{BrewCommandError, ProgressSink, run_step};
use crate::paths::Paths;
use crate::shell::Shell;
use std::collections::HashSet;

/// Tap providing the versioned `php@x.y` formulae.
pub const PHP_TAP: &str = "shivammathur/php";
/// Tap providing `ext@x.y` extension formulae; its formulae may declare the
/// PHP tap as a dependency, so it is always checked second.
pub const EXTENSIONS_TAP: &str = "shivammathur/extensions";

/// The set of taps Homebrew currently knows about.
pub struct TapSet {
    known: HashSet<String>,
}

impl TapSet {
    /// Query `brew tap` for the installed set. Lenient: a failing query
    /// yields an empty set and the prerequisite check will re-tap.
    pub fn detect(shell: &dyn Shell) -> Self {
        let known = match shell.pipe(&format!("{} tap", Paths::brew())) {
            Ok(out) if out.success() => out
                .out
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
            _ => HashSet::new(),
        };
        Self { known }
    }

    pub fn from_taps<I: IntoIterator<Item = S>, S: Into<String>>(taps: I) -> Self {
        Self {
            known: taps.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, tap: &str) -> bool {
        self.known.contains(tap)
    }

    /// Make sure both PHP taps are registered, adding any missing one.
    ///
    /// Idempotent: when both taps are already known this performs zero
    /// shell invocations. Must run before any install/upgrade step because
    /// formula names from these taps are otherwise unresolvable.
    pub fn ensure_php_taps(
        &mut self,
        shell: &dyn Shell,
        title: &str,
        on_progress: &mut ProgressSink,
    ) -> Result<(), BrewCommandError> {
        for tap in [PHP_TAP, EXTENSIONS_TAP] {
            if !self.known.contains(tap) {
                run_step(shell, &format!("{} tap {}", Paths::brew(), tap), title, on_progress)?;
                self.known.insert(tap.to_string());
            }
        }
        Ok(())
    }
}
