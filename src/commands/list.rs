//! List command implementation.

use crate::brew::formulae::{BrewFormulaeHandler, FormulaeHandler};
use crate::output::Output;
use crate::paths::Paths;
use crate::php::environment::PhpEnvironment;
use crate::shell::SystemShell;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Also query Homebrew for available upgrades (runs `brew update`)
    #[arg(long)]
    pub outdated: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let shell = Arc::new(SystemShell);
    let env = PhpEnvironment::detect(shell.clone(), Paths::homebrew_prefix())?;
    let handler = BrewFormulaeHandler::new(shell);

    let catalog = if args.outdated {
        let spinner = Output::spinner("Checking Homebrew for upgrades...");
        let catalog = handler.load_php_versions(&env, true)?;
        spinner.finish_success("Loaded version information.");
        catalog
    } else {
        handler.load_php_versions(&env, false)?
    };

    Output::header("PHP Versions");
    for formula in &catalog {
        let state = match (&formula.installed_version, &formula.upgrade_version) {
            (Some(installed), Some(upgrade)) => format!("{installed} → {upgrade}"),
            (Some(installed), None) => installed.clone(),
            (None, _) => "not installed".to_string(),
        };
        let tag = if formula.prerelease {
            "  (pre-release)"
        } else {
            ""
        };
        println!("  {:<10} {:<10} {}{}", formula.display_name, formula.name, state, tag);
    }

    Ok(())
}
