//! CLI subcommand implementations.

pub mod completions;
pub mod extensions;
pub mod ini;
pub mod list;
pub mod operate;
pub mod proxy;
pub mod secure;
pub mod sites;
pub mod status;
pub mod switch;
