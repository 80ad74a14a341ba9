use std::fmt;

use super::error::StorageError;

/// Canonical stored form of a client-supplied image filename.
///
/// The name is URL-escaped after first being unescaped, so feeding an
/// already-canonical name back in yields the same string. Image rows store
/// this form and object keys are derived from it.
pub fn canonical_filename(raw: &str) -> String {
    let trimmed = raw.trim();
    let decoded = urlencoding::decode(trimmed)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| trimmed.to_string());
    urlencoding::encode(&decoded).into_owned()
}

/// A validated, relative object key inside the bucket.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validate a raw key.
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StorageError::InvalidKey("key is empty".into()));
        }
        if key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(format!("{key} is not relative")));
        }
        if key.chars().any(char::is_control) {
            return Err(StorageError::InvalidKey(
                "key contains control characters".into(),
            ));
        }
        if key.split('/').any(|seg| seg == ".." || seg == ".") {
            return Err(StorageError::InvalidKey(format!("{key} contains a dot segment")));
        }
        Ok(Self(key))
    }

    /// Key of an uploaded catalog asset: `prefix` + canonical filename.
    pub fn for_asset(prefix: &str, filename: &str) -> Result<Self, StorageError> {
        let name = canonical_filename(filename);
        if name.is_empty() {
            return Err(StorageError::InvalidKey("filename is empty".into()));
        }
        Self::new(format!("{prefix}{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}
