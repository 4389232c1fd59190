//! Sites command implementation.

use crate::output::Output;
use crate::paths::Paths;
use crate::valet::config::ValetConfig;
use crate::valet::site::list_sites;
use anyhow::{Context, Result};

pub fn run() -> Result<()> {
    let config = ValetConfig::load_default()
        .context("Valet is not configured (no config.json found)")?;
    let sites = list_sites(&config, &Paths::valet_config_dir())?;

    if sites.is_empty() {
        Output::info("No parked sites found.");
        return Ok(());
    }

    Output::header("Valet Sites");
    for site in &sites {
        let lock = if site.secured { "🔒 " } else { "   " };
        println!("  {lock}{:<24} {}", site.url(), site.path.display());
    }

    Ok(())
}
