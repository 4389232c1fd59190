//! Proxy command implementation.

use crate::output::Output;
use crate::paths::Paths;
use crate::shell::SystemShell;
use crate::valet::config::ValetConfig;
use crate::valet::interactor::ValetInteractor;
use crate::valet::proxy::list_proxies;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ProxyArgs {
    #[command(subcommand)]
    pub action: ProxyAction,
}

#[derive(Debug, Subcommand)]
pub enum ProxyAction {
    /// List configured proxies
    List,

    /// Proxy a domain to a local port
    Add {
        /// Domain name without the TLD (e.g. "mails")
        domain: String,
        /// Target URL (e.g. "http://127.0.0.1:8025")
        target: String,
        /// Issue a TLS certificate for the proxy
        #[arg(long)]
        secure: bool,
    },

    /// Remove a proxy
    Remove {
        /// Domain name without the TLD
        domain: String,
    },
}

pub fn run(args: ProxyArgs, dry_run: bool) -> Result<()> {
    match args.action {
        ProxyAction::List => list(),
        ProxyAction::Add {
            domain,
            target,
            secure,
        } => {
            if dry_run {
                Output::dry_run(format!("Would proxy {domain} to {target}"));
                return Ok(());
            }
            ValetInteractor::new(Arc::new(SystemShell)).add_proxy(&domain, &target, secure)?;
            Output::success(format!("Proxying {domain} to {target}."));
            Ok(())
        }
        ProxyAction::Remove { domain } => {
            if dry_run {
                Output::dry_run(format!("Would remove the proxy for {domain}"));
                return Ok(());
            }
            ValetInteractor::new(Arc::new(SystemShell)).remove_proxy(&domain)?;
            Output::success(format!("Removed the proxy for {domain}."));
            Ok(())
        }
    }
}

fn list() -> Result<()> {
    let config = ValetConfig::load_default()
        .context("Valet is not configured (no config.json found)")?;
    let proxies = list_proxies(&config, &Paths::valet_config_dir())?;

    if proxies.is_empty() {
        Output::info("No proxies configured.");
        return Ok(());
    }

    Output::header("Valet Proxies");
    for proxy in &proxies {
        let lock = if proxy.secured { "🔒 " } else { "   " };
        println!("  {lock}{:<24} → {}", proxy.url(), proxy.target);
    }

    Ok(())
}
