//! php.ini preference persistence.
//!
//! A preference write targets an existing `key = value` line; a missing
//! backing file or key is a typed error rather than a silent default.

use crate::error::PhpupError;
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded php.ini file.
#[derive(Debug)]
pub struct PhpIniFile {
    path: PathBuf,
    contents: String,
}

impl PhpIniFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PhpupError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PhpupError::ConfigMissing {
                path: path.display().to_string(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            contents: fs::read_to_string(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The active (uncommented) value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<String> {
        self.contents.lines().find_map(|line| {
            let (k, v) = Self::split_directive(line)?;
            (k == key).then(|| v.to_string())
        })
    }

    /// Replace the value of an existing `key = value` directive.
    pub fn replace(&mut self, key: &str, value: &str) -> Result<(), PhpupError> {
        let mut replaced = false;
        let lines: Vec<String> = self
            .contents
            .lines()
            .map(|line| match Self::split_directive(line) {
                Some((k, _)) if k == key => {
                    replaced = true;
                    format!("{key} = {value}")
                }
                _ => line.to_string(),
            })
            .collect();

        if !replaced {
            return Err(PhpupError::IniKeyMissing {
                key: key.to_string(),
                path: self.path.display().to_string(),
            });
        }

        self.contents = lines.join("\n");
        if !self.contents.ends_with('\n') {
            self.contents.push('\n');
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), PhpupError> {
        fs::write(&self.path, &self.contents)?;
        Ok(())
    }

    /// Split an active directive line into key and value.
    ///
    /// Commented lines (leading `;`) and section headers are not directives.
    fn split_directive(line: &str) -> Option<(&str, &str)> {
        let trimmed = line.trim();
        if trimmed.starts_with(';') || trimmed.starts_with('[') {
            return None;
        }
        let (key, value) = trimmed.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key, value.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(contents: &str) -> (tempfile::TempDir, PhpIniFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("php.ini");
        fs::write(&path, contents).unwrap();
        (dir, PhpIniFile::load(&path).unwrap())
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let err = PhpIniFile::load("/nonexistent/php.ini").unwrap_err();
        assert!(matches!(err, PhpupError::ConfigMissing { .. }));
    }

    #[test]
    fn reads_active_directives_only() {
        let (_dir, ini) = fixture("; memory_limit = 64M\nmemory_limit = 512M\n");
        assert_eq!(ini.get("memory_limit").unwrap(), "512M");
    }

    #[test]
    fn replace_rewrites_value_in_place() {
        let (_dir, mut ini) = fixture("[PHP]\nmemory_limit = 512M\npost_max_size = 8M\n");
        ini.replace("memory_limit", "1G").unwrap();
        ini.save().unwrap();

        let reread = PhpIniFile::load(ini.path()).unwrap();
        assert_eq!(reread.get("memory_limit").unwrap(), "1G");
        assert_eq!(reread.get("post_max_size").unwrap(), "8M");
    }

    #[test]
    fn replace_missing_key_fails_fast() {
        let (_dir, mut ini) = fixture("memory_limit = 512M\n");
        let err = ini.replace("upload_max_filesize", "100M").unwrap_err();
        assert!(matches!(err, PhpupError::IniKeyMissing { .. }));
    }
}
