//! The unit of Homebrew orchestration.
//!
//! A [`BrewCommand`] is a single named operation composed of one or more
//! shell steps. Every step runs through [`run_step`], which owns the shared
//! behavior: transcript capture, progress-marker translation, and the
//! failure contract. Concrete commands compose these free functions instead
//! of inheriting default implementations.

use crate::brew::progress;
use crate::shell::Shell;
use std::time::Duration;
use thiserror::Error;

/// Hard ceiling for any single shell step.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// A normalized progress event delivered to the caller's sink.
#[derive(Debug, Clone, PartialEq)]
pub struct BrewProgress {
    /// Fraction in `[0,1]`; checkpoint-ordered within one step's stream.
    pub value: f64,
    pub title: String,
    pub description: String,
}

impl BrewProgress {
    pub fn new(value: f64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A failed operation, carrying the full captured transcript for diagnosis.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct BrewCommandError {
    pub message: String,
    /// Ordered non-empty output lines captured before the failure.
    pub log: Vec<String>,
}

impl BrewCommandError {
    pub fn new(message: impl Into<String>, log: Vec<String>) -> Self {
        Self {
            message: message.into(),
            log,
        }
    }

    pub fn without_log(message: impl Into<String>) -> Self {
        Self::new(message, Vec::new())
    }
}

/// Caller-supplied sink for progress events.
///
/// The core has no presentation-thread awareness; the caller decides how to
/// marshal events onto its own context.
pub type ProgressSink<'a> = dyn FnMut(BrewProgress) + 'a;

/// A single named Homebrew operation.
pub trait BrewCommand {
    /// Run the operation, reporting progress through the sink.
    ///
    /// Failure aborts any remaining steps; completed steps are not rolled
    /// back.
    fn execute(&mut self, on_progress: &mut ProgressSink) -> Result<(), BrewCommandError>;

    /// Title used in progress event decoration.
    fn title(&self) -> &str;
}

/// Run one shell step with transcript capture and progress translation.
///
/// Every non-empty output line is appended to the step transcript and fed
/// through the progress reporter; resulting events are decorated with the
/// command title and forwarded. On success the transcript is discarded; a
/// failing exit status or timeout raises a [`BrewCommandError`] carrying it.
pub fn run_step(
    shell: &dyn Shell,
    command: &str,
    title: &str,
    on_progress: &mut ProgressSink,
) -> Result<(), BrewCommandError> {
    tracing::debug!(command, "running brew step");

    let mut transcript: Vec<String> = Vec::new();
    let completion = shell
        .attach(
            command,
            &mut |line, _is_error| {
                if !line.is_empty() {
                    tracing::debug!(target: "phpup::brew", "{line}");
                    transcript.push(line.to_string());
                }
                if let Some((value, description)) = progress::report(line) {
                    on_progress(BrewProgress::new(value, title, description));
                }
            },
            STEP_TIMEOUT,
        )
        .map_err(|e| BrewCommandError::without_log(format!("Failed to run '{command}': {e}")))?;

    if completion.success() {
        Ok(())
    } else {
        Err(BrewCommandError::new(
            "The command failed to run correctly.",
            transcript,
        ))
    }
}
