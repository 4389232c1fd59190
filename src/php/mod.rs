//! PHP environment model: versions, installations, ini preferences.

pub mod environment;
pub mod ini;
pub mod version;

pub use environment::{PhpEnvironment, PhpInstallation};
pub use version::VersionNumber;
