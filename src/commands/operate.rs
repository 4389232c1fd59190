//! Install, upgrade and repair commands: the callers that drive the
//! Homebrew orchestrator and render its progress events.

use crate::brew::command::{BrewCommand, BrewCommandError};
use crate::brew::formulae::{BrewFormulaeHandler, FormulaeHandler};
use crate::brew::install_upgrade::InstallAndUpgradeCommand;
use crate::brew::taps::TapSet;
use crate::output::Output;
use crate::paths::Paths;
use crate::php::environment::PhpEnvironment;
use crate::shell::SystemShell;
use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;

/// How many transcript lines to surface when a step fails.
const FAILURE_LOG_TAIL: usize = 15;

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Short versions to install (e.g. "8.2")
    #[arg(required = true)]
    pub versions: Vec<String>,
}

#[derive(Debug, Args)]
pub struct UpgradeArgs {
    /// Limit the upgrade to these short versions (default: all outdated)
    pub versions: Vec<String>,
}

pub fn run_install(args: InstallArgs, dry_run: bool) -> Result<()> {
    let shell = Arc::new(SystemShell);
    let mut env = PhpEnvironment::detect(shell.clone(), Paths::homebrew_prefix())?;
    let handler = BrewFormulaeHandler::new(shell.clone());
    let catalog = handler.load_php_versions(&env, false)?;

    let mut installing = Vec::new();
    for version in &args.versions {
        let formula = catalog
            .iter()
            .find(|f| f.display_name == format!("PHP {version}"))
            .with_context(|| format!("PHP {version} is not a known version"))?;
        if formula.is_installed() {
            Output::warning(format!("PHP {version} is already installed."));
            continue;
        }
        installing.push(formula.clone());
    }

    if installing.is_empty() {
        Output::success("Nothing to install.");
        return Ok(());
    }

    if dry_run {
        for formula in &installing {
            Output::dry_run(format!("Would install {}", formula.name));
        }
        return Ok(());
    }

    let mut taps = TapSet::detect(shell.as_ref());
    let cmd = InstallAndUpgradeCommand::new(
        "Installing PHP",
        Vec::new(),
        installing,
        shell.clone(),
        &mut env,
        &mut taps,
    );
    drive(cmd)
}

pub fn run_upgrade(args: UpgradeArgs, dry_run: bool) -> Result<()> {
    let shell = Arc::new(SystemShell);
    let mut env = PhpEnvironment::detect(shell.clone(), Paths::homebrew_prefix())?;
    let handler = BrewFormulaeHandler::new(shell.clone());

    let spinner = Output::spinner("Checking Homebrew for upgrades...");
    let catalog = handler.load_php_versions(&env, true)?;
    spinner.finish_success("Loaded version information.");

    let upgrading: Vec<_> = catalog
        .iter()
        .filter(|f| f.has_upgrade())
        .filter(|f| {
            args.versions.is_empty()
                || args
                    .versions
                    .iter()
                    .any(|v| f.display_name == format!("PHP {v}"))
        })
        .cloned()
        .collect();

    if upgrading.is_empty() {
        Output::success("Everything is up to date.");
        return Ok(());
    }

    if dry_run {
        for formula in &upgrading {
            Output::dry_run(format!(
                "Would upgrade {} ({} → {})",
                formula.name,
                formula.installed_version.as_deref().unwrap_or("?"),
                formula.upgrade_version.as_deref().unwrap_or("?")
            ));
        }
        return Ok(());
    }

    let mut taps = TapSet::detect(shell.as_ref());
    let cmd = InstallAndUpgradeCommand::new(
        "Upgrading PHP",
        upgrading,
        Vec::new(),
        shell.clone(),
        &mut env,
        &mut taps,
    );
    drive(cmd)
}

/// Repair runs the orchestrator with both sets empty: the tap check,
/// requery, repair and finalize phases still run.
pub fn run_repair(dry_run: bool) -> Result<()> {
    let shell = Arc::new(SystemShell);
    let mut env = PhpEnvironment::detect(shell.clone(), Paths::homebrew_prefix())?;

    if dry_run {
        let targets = env.repair_targets();
        if targets.is_empty() {
            Output::success("All PHP installations are healthy.");
        } else {
            for target in targets {
                Output::dry_run(format!("Would reinstall {target}"));
            }
        }
        return Ok(());
    }

    let mut taps = TapSet::detect(shell.as_ref());
    let cmd = InstallAndUpgradeCommand::new(
        "Repairing PHP",
        Vec::new(),
        Vec::new(),
        shell.clone(),
        &mut env,
        &mut taps,
    );
    drive(cmd)
}

/// Drive a command, rendering progress events on a percentage bar (plain
/// status lines when stdout is not a terminal).
fn drive(mut cmd: InstallAndUpgradeCommand) -> Result<()> {
    let title = cmd.title().to_string();

    let result = match Output::percent_bar(title.clone()) {
        Some(bar) => {
            let result = cmd.execute(&mut |p| {
                bar.set_fraction(p.value);
                bar.set_message(p.description);
            });
            match &result {
                Ok(()) => bar.finish_success("The operation has succeeded."),
                Err(e) => bar.finish_error(e.message.clone()),
            }
            result
        }
        None => cmd.execute(&mut |p| {
            Output::info(format!("[{:>3.0}%] {}", p.value * 100.0, p.description));
        }),
    };

    result.map_err(report_failure)
}

/// Surface the failing step's message and the tail of its transcript.
fn report_failure(e: BrewCommandError) -> anyhow::Error {
    Output::error(&e.message);
    if !e.log.is_empty() {
        Output::blank();
        Output::info("Last output:");
        let skip = e.log.len().saturating_sub(FAILURE_LOG_TAIL);
        for line in e.log.iter().skip(skip) {
            Output::list_item(line);
        }
    }
    e.into()
}
