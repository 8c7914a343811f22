//! Resource keys and their mapping to relative store paths.

use crate::errors::{Result, RoapidError};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Caller-chosen identifier for one persisted document slot.
///
/// Keys use `/` as the segment separator and must stay beneath the store
/// root: no absolute paths, no `.`/`..` segments, no empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Validate and wrap a key.
    ///
    /// # Errors
    ///
    /// Returns `RoapidError::InvalidKey` if the key would escape the store
    /// root or cannot name a file.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate(&key)?;
        Ok(Self(key))
    }

    /// Key for a remote endpoint document, e.g. `users-7.json`.
    ///
    /// # Errors
    ///
    /// Returns `RoapidError::InvalidKey` if the composed key is unsafe.
    pub fn endpoint(kind: &str, id: &str) -> Result<Self> {
        Self::new(format!("{}-{}.json", kind, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative location of the snapshot beneath the store root.
    pub fn relative_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

fn validate(key: &str) -> Result<()> {
    let invalid = |reason: &str| RoapidError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("key is empty"));
    }
    if key.contains('\0') {
        return Err(invalid("key contains a NUL byte"));
    }
    if key.contains('\\') {
        return Err(invalid("key must use '/' as separator"));
    }
    if key.starts_with('/') {
        return Err(invalid("key must be relative"));
    }
    for segment in key.split('/') {
        if segment.is_empty() {
            return Err(invalid("key contains an empty segment"));
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(invalid("key segment must be a plain file name")),
        }
    }
    Ok(())
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ResourceKey {
    type Error = RoapidError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for ResourceKey {
    type Error = RoapidError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl std::str::FromStr for ResourceKey {
    type Err = RoapidError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_key_convention() {
        let key = ResourceKey::endpoint("users", "7").unwrap();
        assert_eq!(key.as_str(), "users-7.json");
        assert_eq!(key.relative_path(), PathBuf::from("users-7.json"));
    }

    #[test]
    fn test_nested_key_maps_to_nested_path() {
        let key = ResourceKey::new("badges/123.json").unwrap();
        assert_eq!(key.relative_path(), Path::new("badges").join("123.json"));
    }

    #[test]
    fn test_rejects_escaping_keys() {
        for bad in ["", "/etc/passwd", "../x", "a/../b", "a//b", "a/./b", "a\\b", "a/"] {
            assert!(
                matches!(ResourceKey::new(bad), Err(RoapidError::InvalidKey { .. })),
                "expected {:?} to be rejected",
                bad
            );
        }
    }
}
