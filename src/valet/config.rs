//! Valet's `config.json`.

use crate::error::PhpupError;
use crate::paths::Paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_tld() -> String {
    "test".to_string()
}

/// `~/.config/valet/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValetConfig {
    #[serde(default = "default_tld")]
    pub tld: String,
    /// Parked directories; every subdirectory is served as a site.
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loopback: Option<String>,
}

impl ValetConfig {
    /// Load from an explicit path. A missing file is a typed error; callers
    /// that can live without Valet handle it explicitly.
    pub fn load(path: &Path) -> Result<Self, PhpupError> {
        if !path.exists() {
            return Err(PhpupError::ConfigMissing {
                path: path.display().to_string(),
            });
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load from the default Valet configuration directory.
    pub fn load_default() -> Result<Self, PhpupError> {
        Self::load(&Paths::valet_config_dir().join("config.json"))
    }

    /// Certificate key path that marks `domain.tld` as secured.
    pub fn certificate_key(valet_dir: &Path, domain: &str, tld: &str) -> PathBuf {
        valet_dir.join(format!("Certificates/{domain}.{tld}.key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valet_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"tld":"test","paths":["/Users/nico/Sites"],"loopback":"127.0.0.1"}"#,
        )
        .unwrap();

        let config = ValetConfig::load(&path).unwrap();
        assert_eq!(config.tld, "test");
        assert_eq!(config.paths, vec!["/Users/nico/Sites".to_string()]);
        assert_eq!(config.loopback.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn tld_defaults_to_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"paths":[]}"#).unwrap();
        assert_eq!(ValetConfig::load(&path).unwrap().tld, "test");
    }

    #[test]
    fn missing_config_is_a_typed_error() {
        let err = ValetConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, PhpupError::ConfigMissing { .. }));
    }
}
