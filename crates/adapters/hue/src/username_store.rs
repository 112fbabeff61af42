//! Username file — remembers the username a bridge handed out when pairing.
//!
//! The file is a JSON object keyed by bridge address, so one file can serve
//! several bridges:
//!
//! ```json
//! { "192.168.1.10": { "username": "83b7780291a6ceffbe0bd049104df" } }
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::UsernameStoreError;

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    username: String,
}

/// Reads and writes the username file.
#[derive(Debug, Clone)]
pub struct UsernameStore {
    path: PathBuf,
}

impl UsernameStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The username stored for `ip`, if any.
    ///
    /// A missing file counts as an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`UsernameStoreError`] if the file exists but cannot be read
    /// or parsed.
    pub fn load(&self, ip: &str) -> Result<Option<String>, UsernameStoreError> {
        let mut entries = self.read_all()?;
        Ok(entries.remove(ip).map(|entry| entry.username))
    }

    /// Store `username` for `ip`, keeping entries of other bridges.
    ///
    /// # Errors
    ///
    /// Returns [`UsernameStoreError`] if the file cannot be read or written.
    pub fn save(&self, ip: &str, username: &str) -> Result<(), UsernameStoreError> {
        let mut entries = self.read_all()?;
        entries.insert(
            ip.to_string(),
            Entry {
                username: username.to_string(),
            },
        );
        let content =
            serde_json::to_string_pretty(&entries).map_err(|source| UsernameStoreError::Format {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, content).map_err(|source| UsernameStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn read_all(&self) -> Result<BTreeMap<String, Entry>, UsernameStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(UsernameStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| UsernameStoreError::Format {
            path: self.path.clone(),
            source,
        })
    }
}
