//! Store configuration.

use crate::errors::{Result, RoapidError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory snapshots live under when nothing else is configured.
pub const DEFAULT_STORE_ROOT: &str = "data";

/// Configuration shared by the change detector and the snapshot store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_ROOT)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// # Errors
    ///
    /// Returns `RoapidError::Config` if the TOML is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RoapidError::Config {
            message: e.to_string(),
        })
    }

    /// Load a TOML file such as `root = "/var/lib/roapid"`.
    ///
    /// # Errors
    ///
    /// Returns `RoapidError::Io` if the file cannot be read and
    /// `RoapidError::Config` if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RoapidError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_is_data() {
        assert_eq!(StoreConfig::default().root, PathBuf::from("data"));
    }

    #[test]
    fn test_empty_toml_uses_default() {
        assert_eq!(StoreConfig::from_toml_str("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_root_from_toml() {
        let cfg = StoreConfig::from_toml_str("root = \"/srv/snapshots\"").unwrap();
        assert_eq!(cfg.root, PathBuf::from("/srv/snapshots"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            StoreConfig::from_toml_str("rooot = \"x\""),
            Err(RoapidError::Config { .. })
        ));
    }
}
