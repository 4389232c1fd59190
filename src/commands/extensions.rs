//! Extensions command implementation.

use crate::brew::extensions::from_tap;
use crate::brew::taps::EXTENSIONS_TAP;
use crate::output::Output;
use crate::paths::Paths;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ExtensionsArgs {
    /// Limit the listing to one short version (e.g. "8.2")
    #[arg(id = "php_version", value_name = "VERSION")]
    pub version: Option<String>,
}

pub fn run(args: ExtensionsArgs) -> Result<()> {
    let grouped = from_tap(&Paths::tap_formula_dir(EXTENSIONS_TAP));

    if grouped.is_empty() {
        Output::warning(format!(
            "No extension formulae found. Is the {EXTENSIONS_TAP} tap installed?"
        ));
        return Ok(());
    }

    for (version, extensions) in &grouped {
        if let Some(wanted) = &args.version {
            if version != wanted {
                continue;
            }
        }
        Output::header(format!("PHP {version}"));
        for extension in extensions {
            Output::list_item(&extension.name);
        }
    }

    Ok(())
}
