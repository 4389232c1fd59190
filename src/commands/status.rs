//! Status command implementation.

use crate::output::Output;
use crate::paths::Paths;
use crate::php::environment::PhpEnvironment;
use crate::shell::SystemShell;
use crate::valet::config::ValetConfig;
use anyhow::Result;
use std::sync::Arc;

pub fn run() -> Result<()> {
    let env = PhpEnvironment::detect(Arc::new(SystemShell), Paths::homebrew_prefix())?;

    Output::header("PHP Environment");
    Output::kv(
        "Active PHP",
        env.current_version()
            .map(|v| format!("PHP {v}"))
            .unwrap_or_else(|| "none".to_string()),
    );
    Output::kv(
        "php alias",
        env.alias()
            .map(|v| format!("PHP {v}"))
            .unwrap_or_else(|| "unknown".to_string()),
    );

    let installed = if env.installations().is_empty() {
        "none".to_string()
    } else {
        env.installations()
            .iter()
            .map(|(short, install)| {
                if install.healthy {
                    short.clone()
                } else {
                    format!("{short} (broken)")
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    Output::kv("Installed", installed);

    match ValetConfig::load_default() {
        Ok(config) => Output::kv("Valet TLD", format!(".{}", config.tld)),
        Err(_) => Output::kv("Valet", "not configured"),
    }

    if env.installations().values().any(|i| !i.healthy) {
        Output::blank();
        Output::warning("Some installations are broken. Run `phpup repair`.");
    }

    Ok(())
}
