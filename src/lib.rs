//! phpup - supervise a Homebrew-based PHP development environment.
//!
//! A library for detecting installed PHP versions, switching the active
//! version, listing Valet sites and proxies, and orchestrating Homebrew
//! install/upgrade/repair operations.
//!
//! # Architecture
//!
//! Everything that touches the system goes through two seams:
//!
//! - [`shell::Shell`]: external process execution (streamed or captured),
//!   so orchestration logic is testable without spawning `brew`.
//! - [`brew::command::BrewCommand`]: a long-running Homebrew operation that
//!   reports normalized progress events to a caller-supplied sink.
//!
//! The CLI layer in [`commands`] is only a consumer: it renders progress
//! events and surfaces captured transcripts when an operation fails.

pub mod brew;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod paths;
pub mod php;
pub mod shell;
pub mod valet;

pub use cli::{Cli, Commands};
