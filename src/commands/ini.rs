//! Ini command implementation: read and write php.ini preferences.

use crate::output::Output;
use crate::paths::Paths;
use crate::php::environment::PhpEnvironment;
use crate::php::ini::PhpIniFile;
use crate::shell::SystemShell;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct IniArgs {
    #[command(subcommand)]
    pub action: IniAction,
}

#[derive(Debug, Subcommand)]
pub enum IniAction {
    /// Print the value of a directive
    Get {
        /// Directive name (e.g. "memory_limit")
        key: String,
        /// Explicit php.ini path (default: the active version's ini)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Change the value of an existing directive
    Set {
        /// Directive name (e.g. "memory_limit")
        key: String,
        /// New value (e.g. "1G")
        value: String,
        /// Explicit php.ini path (default: the active version's ini)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub fn run(args: IniArgs, dry_run: bool) -> Result<()> {
    match args.action {
        IniAction::Get { key, file } => {
            let ini = PhpIniFile::load(resolve_file(file)?)?;
            match ini.get(&key) {
                Some(value) => println!("{value}"),
                None => Output::warning(format!(
                    "{key} has no active value in {}",
                    ini.path().display()
                )),
            }
            Ok(())
        }
        IniAction::Set { key, value, file } => {
            let mut ini = PhpIniFile::load(resolve_file(file)?)?;
            if dry_run {
                Output::dry_run(format!(
                    "Would set {key} = {value} in {}",
                    ini.path().display()
                ));
                return Ok(());
            }
            ini.replace(&key, &value)?;
            ini.save()?;
            Output::success(format!("Set {key} = {value} in {}", ini.path().display()));
            Ok(())
        }
    }
}

/// An explicit `--file` wins; otherwise target the active version's ini.
fn resolve_file(file: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }
    let env = PhpEnvironment::detect(Arc::new(SystemShell), Paths::homebrew_prefix())?;
    let short = env
        .current_version()
        .context("no active PHP version; pass --file to target an ini explicitly")?;
    Ok(Paths::php_ini(&short))
}
