//! Use command implementation: switch the active PHP version.

use crate::output::Output;
use crate::paths::Paths;
use crate::php::environment::PhpEnvironment;
use crate::shell::SystemShell;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct UseArgs {
    /// Short version to activate (e.g. "8.2")
    #[arg(id = "php_version", value_name = "VERSION")]
    pub version: String,
}

pub fn run(args: UseArgs, dry_run: bool) -> Result<()> {
    let env = PhpEnvironment::detect(Arc::new(SystemShell), Paths::homebrew_prefix())?;

    if dry_run {
        Output::dry_run(format!("Would switch the active version to PHP {}", args.version));
        return Ok(());
    }

    let spinner = Output::spinner(format!("Switching to PHP {}...", args.version));
    match env.switch_to(&args.version) {
        Ok(()) => {
            spinner.finish_success(format!("Now using PHP {}.", args.version));
            Ok(())
        }
        Err(e) => {
            spinner.finish_error(format!("Could not switch to PHP {}.", args.version));
            Err(e)
        }
    }
}
