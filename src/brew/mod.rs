//! Homebrew integration: formula catalog, taps, and the operation
//! orchestrator that drives `brew` with streamed progress.

pub mod command;
pub mod extensions;
pub mod formula;
pub mod formulae;
pub mod install_upgrade;
pub mod progress;
pub mod taps;

pub use command::{BrewCommand, BrewCommandError, BrewProgress};
pub use formula::PhpFormula;
pub use install_upgrade::InstallAndUpgradeCommand;
pub use taps::TapSet;
