//! CLI argument definitions for phpup.
//!
//! Separated from `main.rs` so shell completion generation can reference
//! these types.

use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Debug, Parser)]
#[command(name = "phpup")]
#[command(about = "Supervise a Homebrew-based PHP development environment")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show what would be done without making changes
    #[arg(long, short = 'n', global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the active PHP version and environment summary
    Status,

    /// List PHP versions known to Homebrew
    List(commands::list::ListArgs),

    /// Switch the active PHP version
    Use(commands::switch::UseArgs),

    /// Install PHP versions
    Install(commands::operate::InstallArgs),

    /// Upgrade installed PHP versions
    ///
    /// Runs upgrades first, then installations, then reinstalls any
    /// installation that fails its health check.
    Upgrade(commands::operate::UpgradeArgs),

    /// Reinstall unhealthy PHP installations
    Repair,

    /// List Valet-served sites
    Sites,

    /// Manage Valet reverse proxies
    Proxy(commands::proxy::ProxyArgs),

    /// Secure a Valet domain with TLS
    Secure(commands::secure::SecureArgs),

    /// Remove TLS from a Valet domain
    Unsecure(commands::secure::SecureArgs),

    /// List PHP extensions available from the extensions tap
    Extensions(commands::extensions::ExtensionsArgs),

    /// Read or write php.ini preferences
    Ini(commands::ini::IniArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
