//! `@key.path` storage key parsing.

use crate::error::StorageError;

/// A parsed deep-path storage key.
///
/// Pattern: `^@(key)(\.(path))?$` where `key` is non-empty and contains no
/// dot. The `path` addresses into the JSON object stored under `key` using
/// the `value_path` syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathKey<'a> {
    pub key: &'a str,
    pub path: Option<&'a str>,
}

impl<'a> PathKey<'a> {
    /// Whether `name` routes through deep-path addressing at all.
    pub fn is_path_key(name: &str) -> bool {
        name.starts_with('@')
    }

    /// Parse a `@key` or `@key.path` name.
    ///
    /// A malformed name is a caller contract violation and is not recovered.
    pub fn parse(name: &'a str) -> Result<Self, StorageError> {
        let malformed = || StorageError::MalformedPathKey(name.to_string());
        let rest = name.strip_prefix('@').ok_or_else(malformed)?;
        match rest.split_once('.') {
            Some((key, path)) => {
                if key.is_empty() {
                    return Err(malformed());
                }
                Ok(Self {
                    key,
                    path: Some(path),
                })
            }
            None => {
                if rest.is_empty() {
                    return Err(malformed());
                }
                Ok(Self {
                    key: rest,
                    path: None,
                })
            }
        }
    }
}
