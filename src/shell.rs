//! Abstraction over external shell execution for testability.
//!
//! All `brew`/`valet`/`php` invocations go through the [`Shell`] trait:
//!
//! - [`Shell::attach`] runs a long-lived command and delivers output line by
//!   line, in the order the process produced it, with a hard timeout. This
//!   is the contract the Homebrew orchestrator requires.
//! - [`Shell::pipe`] runs a short query and captures its full output.
//!
//! [`SystemShell`] is the production implementation (`/bin/sh -c`). The
//! `script` module provides a scripted double that records every invoked
//! command and replays canned output, enabling fast, deterministic unit
//! tests without spawning subprocesses.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a streamed [`Shell::attach`] invocation.
#[derive(Debug, Clone)]
pub struct ShellCompletion {
    /// Process exit code (-1 when killed by a signal).
    pub code: i32,
    /// True when the timeout fired before the process exited.
    pub timed_out: bool,
    /// Everything the process wrote, in delivery order.
    pub output: String,
}

impl ShellCompletion {
    /// Exit code 0 and no timeout.
    pub fn success(&self) -> bool {
        !self.timed_out && self.code == 0
    }
}

/// Result of a captured [`Shell::pipe`] invocation.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    pub out: String,
    pub err: String,
    pub code: i32,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Trait for abstracting shell execution.
///
/// Stored as `Arc<dyn Shell>` by the services that need it, mirroring how
/// command execution is injected elsewhere in the codebase.
pub trait Shell: Send + Sync {
    /// Run a command, invoking `on_line` once per output line (second
    /// argument: the line came from stderr). Lines are delivered in the
    /// order the process emitted them. Exceeding `timeout` kills the
    /// process and reports `timed_out`.
    fn attach(
        &self,
        command: &str,
        on_line: &mut dyn FnMut(&str, bool),
        timeout: Duration,
    ) -> Result<ShellCompletion>;

    /// Run a command to completion and capture stdout/stderr/exit code.
    fn pipe(&self, command: &str) -> Result<ShellOutput>;
}

/// Production implementation backed by `/bin/sh -c`.
pub struct SystemShell;

impl SystemShell {
    fn spawn_reader<R: Read + Send + 'static>(
        reader: R,
        tx: mpsc::Sender<(String, bool)>,
        is_error: bool,
    ) {
        thread::spawn(move || {
            for line in BufReader::new(reader).lines() {
                match line {
                    Ok(line) => {
                        if tx.send((line, is_error)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });
    }
}

impl Shell for SystemShell {
    fn attach(
        &self,
        command: &str,
        on_line: &mut dyn FnMut(&str, bool),
        timeout: Duration,
    ) -> Result<ShellCompletion> {
        let mut child = Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn '{command}'"))?;

        let stdout = child.stdout.take().context("stdout pipe missing")?;
        let stderr = child.stderr.take().context("stderr pipe missing")?;

        let (tx, rx) = mpsc::channel();
        Self::spawn_reader(stdout, tx.clone(), false);
        Self::spawn_reader(stderr, tx, true);

        let deadline = Instant::now() + timeout;
        let mut output = String::new();
        let mut timed_out = false;

        // Both reader threads dropping their senders disconnects the
        // channel, which is our signal that the process closed its pipes.
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((line, is_error)) => {
                    output.push_str(&line);
                    output.push('\n');
                    on_line(&line, is_error);
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    timed_out = true;
                    let _ = child.kill();
                    break;
                }
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for '{command}'"))?;

        Ok(ShellCompletion {
            code: status.code().unwrap_or(-1),
            timed_out,
            output,
        })
    }

    fn pipe(&self, command: &str) -> Result<ShellOutput> {
        let output = Command::new("/bin/sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run '{command}'"))?;

        Ok(ShellOutput {
            out: String::from_utf8_lossy(&output.stdout).into_owned(),
            err: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code().unwrap_or(-1),
        })
    }
}

/// Scripted shell double for unit tests.
#[cfg(test)]
pub mod script {
    use super::*;
    use std::sync::Mutex;

    struct Rule {
        needle: String,
        code: i32,
        lines: Vec<String>,
    }

    /// Records every invoked command and replays canned responses.
    ///
    /// Commands are matched against rules by substring, first match wins;
    /// unmatched commands succeed with no output.
    pub struct ScriptedShell {
        rules: Vec<Rule>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedShell {
        pub fn new() -> Self {
            Self {
                rules: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Add a rule: any command containing `needle` exits with `code`
        /// after emitting `lines`.
        pub fn on(mut self, needle: &str, code: i32, lines: &[&str]) -> Self {
            self.rules.push(Rule {
                needle: needle.to_string(),
                code,
                lines: lines.iter().map(|l| l.to_string()).collect(),
            });
            self
        }

        /// All commands invoked so far, in order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn find(&self, command: &str) -> Option<&Rule> {
            self.rules.iter().find(|r| command.contains(&r.needle))
        }

        fn record(&self, command: &str) {
            self.calls.lock().unwrap().push(command.to_string());
        }
    }

    impl Shell for ScriptedShell {
        fn attach(
            &self,
            command: &str,
            on_line: &mut dyn FnMut(&str, bool),
            _timeout: Duration,
        ) -> Result<ShellCompletion> {
            self.record(command);
            let mut output = String::new();
            let mut code = 0;
            if let Some(rule) = self.find(command) {
                code = rule.code;
                for line in &rule.lines {
                    output.push_str(line);
                    output.push('\n');
                    on_line(line, false);
                }
            }
            Ok(ShellCompletion {
                code,
                timed_out: false,
                output,
            })
        }

        fn pipe(&self, command: &str) -> Result<ShellOutput> {
            self.record(command);
            let (code, out) = match self.find(command) {
                Some(rule) => (rule.code, rule.lines.join("\n")),
                None => (0, String::new()),
            };
            Ok(ShellOutput {
                out,
                err: String::new(),
                code,
            })
        }
    }
}
