//! Mutating Valet operations, shelling out to the `valet` binary.

use crate::paths::Paths;
use crate::shell::Shell;
use anyhow::{Result, bail};
use std::sync::Arc;

pub struct ValetInteractor {
    shell: Arc<dyn Shell>,
}

impl ValetInteractor {
    pub fn new(shell: Arc<dyn Shell>) -> Self {
        Self { shell }
    }

    pub fn add_proxy(&self, domain: &str, target: &str, secure: bool) -> Result<()> {
        let secure_flag = if secure { " --secure" } else { "" };
        self.run(&format!(
            "{} proxy {domain} {target}{secure_flag}",
            Paths::valet()
        ))
    }

    pub fn remove_proxy(&self, domain: &str) -> Result<()> {
        self.run(&format!("{} unproxy {domain}", Paths::valet()))
    }

    pub fn secure(&self, domain: &str) -> Result<()> {
        self.run(&format!("{} secure {domain}", Paths::valet()))
    }

    pub fn unsecure(&self, domain: &str) -> Result<()> {
        self.run(&format!("{} unsecure {domain}", Paths::valet()))
    }

    fn run(&self, command: &str) -> Result<()> {
        let out = self.shell.pipe(command)?;
        if !out.success() {
            let detail = if out.err.trim().is_empty() {
                out.out.trim().to_string()
            } else {
                out.err.trim().to_string()
            };
            bail!("valet failed: {detail}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::script::ScriptedShell;

    #[test]
    fn proxy_commands_are_composed_correctly() {
        let shell = Arc::new(ScriptedShell::new());
        let valet = ValetInteractor::new(shell.clone());

        valet.add_proxy("mails", "http://127.0.0.1:8025", true).unwrap();
        valet.remove_proxy("mails").unwrap();
        valet.secure("blog").unwrap();
        valet.unsecure("blog").unwrap();

        let calls = shell.calls();
        assert!(calls[0].contains("proxy mails http://127.0.0.1:8025 --secure"));
        assert!(calls[1].contains("unproxy mails"));
        assert!(calls[2].contains("secure blog"));
        assert!(calls[3].contains("unsecure blog"));
    }

    #[test]
    fn failing_valet_command_is_an_error() {
        let shell = Arc::new(ScriptedShell::new().on("unproxy", 1, &["No proxy found."]));
        let valet = ValetInteractor::new(shell);
        let err = valet.remove_proxy("ghost").unwrap_err();
        assert!(err.to_string().contains("No proxy found."));
    }
}
