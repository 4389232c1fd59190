//! The install-and-upgrade orchestrator.
//!
//! Runs a multi-step Homebrew workflow as a single [`BrewCommand`]:
//! upgrades first (installations may very well break otherwise), then
//! installations, then a health check with targeted reinstalls. When the
//! umbrella `php` formula is about to collapse its installed version into a
//! new one, the generic steps are replaced by a single swap step that
//! upgrades the umbrella and pins the previously-installed version back as
//! `php@<short>`.
//!
//! Failure in any step aborts the remaining plan and propagates; completed
//! steps are not rolled back.

use crate::brew::command::{
    BrewCommand, BrewCommandError, BrewProgress, ProgressSink, run_step,
};
use crate::brew::formula::PhpFormula;
use crate::brew::taps::TapSet;
use crate::paths::Paths;
use crate::php::environment::PhpEnvironment;
use crate::shell::Shell;
use std::sync::Arc;

pub struct InstallAndUpgradeCommand<'a> {
    title: String,
    upgrading: Vec<PhpFormula>,
    installing: Vec<PhpFormula>,
    shell: Arc<dyn Shell>,
    env: &'a mut PhpEnvironment,
    taps: &'a mut TapSet,
    /// Short version that was active when the command was created, restored
    /// after the operation so the user's selection survives.
    guarded_version: Option<String>,
}

impl<'a> InstallAndUpgradeCommand<'a> {
    pub fn new(
        title: impl Into<String>,
        upgrading: Vec<PhpFormula>,
        installing: Vec<PhpFormula>,
        shell: Arc<dyn Shell>,
        env: &'a mut PhpEnvironment,
        taps: &'a mut TapSet,
    ) -> Self {
        let guarded_version = env.current_version();
        Self {
            title: title.into(),
            upgrading,
            installing,
            shell,
            env,
            taps,
            guarded_version,
        }
    }

    fn upgrade_packages(&mut self, on_progress: &mut ProgressSink) -> Result<(), BrewCommandError> {
        if self.upgrading.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = self.upgrading.iter().map(|f| f.name.as_str()).collect();
        let command = format!(
            "export HOMEBREW_NO_INSTALL_UPGRADE=true; \
             export HOMEBREW_NO_INSTALL_CLEANUP=true; \
             {} upgrade {}",
            Paths::brew(),
            names.join(" ")
        );
        run_step(self.shell.as_ref(), &command, &self.title, on_progress)
    }

    fn install_packages(&mut self, on_progress: &mut ProgressSink) -> Result<(), BrewCommandError> {
        if self.installing.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = self.installing.iter().map(|f| f.name.as_str()).collect();
        let command = format!(
            "export HOMEBREW_NO_INSTALL_UPGRADE=true; \
             export HOMEBREW_NO_INSTALL_CLEANUP=true; \
             {} install {} --force",
            Paths::brew(),
            names.join(" ")
        );
        run_step(self.shell.as_ref(), &command, &self.title, on_progress)
    }

    /// The swap step: upgrade the umbrella, then explicitly re-install the
    /// short version that was installed before the upgrade collapsed it.
    ///
    /// When no short version can be derived from the installed version the
    /// step is silently skipped; the alias re-resolution that follows still
    /// runs.
    fn upgrade_main_formula(
        &mut self,
        unavailable: &PhpFormula,
        on_progress: &mut ProgressSink,
    ) -> Result<(), BrewCommandError> {
        let Some(short) = unavailable.installed_short() else {
            return Ok(());
        };
        let brew = Paths::brew();
        let command = format!(
            "export HOMEBREW_NO_INSTALL_CLEANUP=true; \
             {brew} upgrade php; \
             {brew} install php@{short};"
        );
        run_step(self.shell.as_ref(), &command, &self.title, on_progress)
    }

    fn repair_broken_packages(
        &mut self,
        on_progress: &mut ProgressSink,
    ) -> Result<(), BrewCommandError> {
        let requiring_repair = self.env.repair_targets();
        if requiring_repair.is_empty() {
            return Ok(());
        }
        let command = format!(
            "export HOMEBREW_NO_INSTALL_UPGRADE=true; \
             export HOMEBREW_NO_INSTALL_CLEANUP=true; \
             export HOMEBREW_NO_INSTALLED_DEPENDENTS_CHECK=true; \
             {} reinstall {} --force",
            Paths::brew(),
            requiring_repair.join(" ")
        );
        run_step(self.shell.as_ref(), &command, &self.title, on_progress)
    }

    /// Final reconciliation; never fails the already-successful operation.
    fn completed_operations(&mut self, on_progress: &mut ProgressSink) {
        on_progress(BrewProgress::new(
            0.95,
            &self.title,
            "Reloading PHP versions...",
        ));

        if let Err(e) = self.env.refresh() {
            tracing::warn!("could not refresh PHP versions after operation: {e}");
        }
        self.env.determine_alias();

        if let Some(version) = self.guarded_version.clone() {
            if let Err(e) = self.env.switch_to(&version) {
                tracing::warn!("could not restore PHP {version}: {e}");
            }
        }

        on_progress(BrewProgress::new(
            1.0,
            "Operation completed!",
            "The installation has succeeded.",
        ));
    }
}

impl BrewCommand for InstallAndUpgradeCommand<'_> {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&mut self, on_progress: &mut ProgressSink) -> Result<(), BrewCommandError> {
        on_progress(BrewProgress::new(
            0.2,
            "Please wait...",
            "Preparing Homebrew...",
        ));

        // Package names from the PHP taps are unresolvable until both taps
        // are registered.
        self.taps
            .ensure_php_taps(self.shell.as_ref(), &self.title, on_progress)?;

        let unavailable = self
            .upgrading
            .iter()
            .find(|f| f.unavailable_after_upgrade())
            .cloned();

        match unavailable {
            None => {
                self.upgrade_packages(on_progress)?;
                self.install_packages(on_progress)?;
            }
            Some(formula) => {
                self.upgrade_main_formula(&formula, on_progress)?;
                self.env.determine_alias();
            }
        }

        // Always re-derive the installed snapshot before deciding repairs.
        self.env.refresh().map_err(|e| {
            BrewCommandError::without_log(format!("Could not refresh installed PHP versions: {e}"))
        })?;

        self.repair_broken_packages(on_progress)?;
        self.completed_operations(on_progress);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brew::taps::{EXTENSIONS_TAP, PHP_TAP};
    use crate::shell::script::ScriptedShell;
    use std::fs;
    use std::path::Path;

    fn formula(name: &str, installed: Option<&str>, upgrade: Option<&str>) -> PhpFormula {
        PhpFormula {
            name: name.to_string(),
            display_name: String::new(),
            installed_version: installed.map(|s| s.to_string()),
            upgrade_version: upgrade.map(|s| s.to_string()),
            prerelease: false,
        }
    }

    fn fixture(shell: Arc<ScriptedShell>) -> (tempfile::TempDir, PhpEnvironment, TapSet) {
        let dir = tempfile::tempdir().unwrap();
        let env = PhpEnvironment::new(shell, dir.path().to_path_buf());
        let taps = TapSet::from_taps([PHP_TAP, EXTENSIONS_TAP]);
        (dir, env, taps)
    }

    fn fake_install(prefix: &Path, short: &str) {
        let bin = prefix.join(format!("opt/php@{short}/bin"));
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("php"), "").unwrap();
    }

    #[test]
    fn generic_branch_upgrades_then_installs() {
        let shell = Arc::new(ScriptedShell::new());
        let (_dir, mut env, mut taps) = fixture(shell.clone());

        let mut cmd = InstallAndUpgradeCommand::new(
            "Upgrading PHP",
            vec![formula("php@8.1", Some("8.1.17"), Some("8.1.20"))],
            vec![formula("php@8.3", None, None)],
            shell.clone(),
            &mut env,
            &mut taps,
        );

        let mut events = Vec::new();
        cmd.execute(&mut |p| events.push(p)).unwrap();

        let calls = shell.calls();
        let upgrade = calls
            .iter()
            .position(|c| c.contains("upgrade php@8.1"))
            .expect("upgrade step ran");
        let install = calls
            .iter()
            .position(|c| c.contains("install php@8.3 --force"))
            .expect("install step ran");
        assert!(upgrade < install, "upgrades run before installations");

        // Steps stay independent of Homebrew's implicit side effects
        assert!(calls[upgrade].contains("HOMEBREW_NO_INSTALL_UPGRADE=true"));
        assert!(calls[upgrade].contains("HOMEBREW_NO_INSTALL_CLEANUP=true"));
        assert!(calls[install].contains("HOMEBREW_NO_INSTALL_UPGRADE=true"));

        assert_eq!(events.first().unwrap().value, 0.2);
        assert_eq!(events.last().unwrap().value, 1.0);
    }

    #[test]
    fn unavailable_formula_takes_the_swap_branch() {
        let shell = Arc::new(ScriptedShell::new());
        let (_dir, mut env, mut taps) = fixture(shell.clone());

        let umbrella = formula("php", Some("8.2.3"), Some("8.3.0"));
        assert!(umbrella.unavailable_after_upgrade());

        let mut cmd = InstallAndUpgradeCommand::new(
            "Upgrading PHP",
            vec![umbrella, formula("php@8.1", Some("8.1.17"), Some("8.1.20"))],
            vec![formula("php@8.3", None, None)],
            shell.clone(),
            &mut env,
            &mut taps,
        );
        cmd.execute(&mut |_| {}).unwrap();

        let calls = shell.calls();
        let swap = calls
            .iter()
            .find(|c| c.contains("upgrade php;") && c.contains("install php@8.2;"))
            .expect("combined swap step ran");
        assert!(swap.contains("HOMEBREW_NO_INSTALL_CLEANUP=true"));

        // The generic steps never run for either formula
        assert!(!calls.iter().any(|c| c.contains("upgrade php@8.1")));
        assert!(!calls.iter().any(|c| c.contains("install php@8.3 --force")));

        // The umbrella alias is re-resolved after the swap
        assert!(calls.iter().any(|c| c.contains("info php --json")));
    }

    #[test]
    fn swap_without_derivable_short_version_degrades_to_noop() {
        let shell = Arc::new(ScriptedShell::new());
        let (_dir, mut env, mut taps) = fixture(shell.clone());

        let mut cmd = InstallAndUpgradeCommand::new(
            "Upgrading PHP",
            Vec::new(),
            Vec::new(),
            shell.clone(),
            &mut env,
            &mut taps,
        );

        let before = shell.call_count();
        let unparseable = formula("php", None, Some("8.3.0"));
        cmd.upgrade_main_formula(&unparseable, &mut |_| {}).unwrap();
        assert_eq!(shell.call_count(), before);
    }

    #[test]
    fn failing_step_aborts_remaining_plan_with_transcript() {
        let shell = Arc::new(
            ScriptedShell::new().on("upgrade php@8.1", 1, &["==> Upgrading", "Error: conflict"]),
        );
        let (_dir, mut env, mut taps) = fixture(shell.clone());

        let mut cmd = InstallAndUpgradeCommand::new(
            "Upgrading PHP",
            vec![formula("php@8.1", Some("8.1.17"), Some("8.1.20"))],
            vec![formula("php@8.3", None, None)],
            shell.clone(),
            &mut env,
            &mut taps,
        );

        let err = cmd.execute(&mut |_| {}).unwrap_err();
        assert_eq!(
            err.log,
            vec!["==> Upgrading".to_string(), "Error: conflict".to_string()]
        );

        let calls = shell.calls();
        assert!(!calls.iter().any(|c| c.contains("install php@8.3")));
        assert!(!calls.iter().any(|c| c.contains("reinstall")));
    }

    #[test]
    fn empty_operation_still_requeries_and_completes() {
        let shell = Arc::new(ScriptedShell::new());
        let dir = tempfile::tempdir().unwrap();
        let mut env = PhpEnvironment::new(shell.clone(), dir.path().to_path_buf());
        // Both taps missing: EnsureTaps still runs
        let mut taps = TapSet::from_taps(Vec::<String>::new());

        let mut cmd = InstallAndUpgradeCommand::new(
            "Repairing PHP",
            Vec::new(),
            Vec::new(),
            shell.clone(),
            &mut env,
            &mut taps,
        );

        let mut events = Vec::new();
        cmd.execute(&mut |p| events.push(p)).unwrap();

        let calls = shell.calls();
        assert!(calls.iter().any(|c| c.contains("tap shivammathur/php")));
        assert!(calls.iter().any(|c| c.contains("tap shivammathur/extensions")));
        assert!(!calls.iter().any(|c| c.contains(" upgrade ")));
        assert!(!calls.iter().any(|c| c.contains(" reinstall ")));

        let last = events.last().unwrap();
        assert_eq!(last.value, 1.0);
        assert_eq!(last.title, "Operation completed!");
    }

    #[test]
    fn unhealthy_alias_version_is_repaired_as_umbrella() {
        let shell = Arc::new(
            ScriptedShell::new()
                .on("php@8.1/bin/php", 0, &["8.1.17"])
                .on("php@8.2/bin/php", 1, &[]),
        );
        let dir = tempfile::tempdir().unwrap();
        fake_install(dir.path(), "8.1");
        fake_install(dir.path(), "8.2");

        let mut env = PhpEnvironment::new(shell.clone(), dir.path().to_path_buf());
        env.set_state(Default::default(), Some("8.2".to_string()));
        let mut taps = TapSet::from_taps([PHP_TAP, EXTENSIONS_TAP]);

        let mut cmd = InstallAndUpgradeCommand::new(
            "Repairing PHP",
            Vec::new(),
            Vec::new(),
            shell.clone(),
            &mut env,
            &mut taps,
        );
        cmd.execute(&mut |_| {}).unwrap();

        let repair = shell
            .calls()
            .into_iter()
            .find(|c| c.contains("reinstall"))
            .expect("repair step ran");
        assert!(repair.contains("reinstall php --force"));
        assert!(!repair.contains("php@8.2"));
        assert!(repair.contains("HOMEBREW_NO_INSTALLED_DEPENDENTS_CHECK=true"));
    }
}
