//! Secure/unsecure command implementation.

use crate::output::Output;
use crate::shell::SystemShell;
use crate::valet::interactor::ValetInteractor;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct SecureArgs {
    /// Domain name without the TLD (e.g. "blog")
    pub domain: String,
}

pub fn run(args: SecureArgs, secure: bool, dry_run: bool) -> Result<()> {
    let verb = if secure { "secure" } else { "unsecure" };

    if dry_run {
        Output::dry_run(format!("Would {verb} {}", args.domain));
        return Ok(());
    }

    let valet = ValetInteractor::new(Arc::new(SystemShell));
    let spinner = Output::spinner(format!("Running valet {verb}..."));
    let result = if secure {
        valet.secure(&args.domain)
    } else {
        valet.unsecure(&args.domain)
    };

    match result {
        Ok(()) => {
            if secure {
                spinner.finish_success(format!("{} is now served over TLS.", args.domain));
            } else {
                spinner.finish_success(format!("{} is now served over plain HTTP.", args.domain));
            }
            Ok(())
        }
        Err(e) => {
            spinner.finish_error(format!("Could not {verb} {}.", args.domain));
            Err(e)
        }
    }
}
