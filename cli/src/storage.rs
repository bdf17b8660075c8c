//! JSON-file key-value storage with `localStorage` semantics.
//!
//! The file holds one object mapping keys to string values, the same shape a
//! browser keeps. Writes stay in memory until [`FileStorage::save`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use feign::io::storage::{KeyValueStorage, MemoryStorage};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not a storage file: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: MemoryStorage,
    dirty: bool,
}

impl FileStorage {
    /// Open `path`; a missing file starts empty.
    ///
    /// # Errors
    ///
    /// Unreadable files and files that are not a string-to-string object.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let items = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw).map_err(|source| {
                StorageError::Format {
                    path: path.to_owned(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        Ok(Self {
            path: path.to_owned(),
            items: MemoryStorage::from(items),
            dirty: false,
        })
    }

    /// Write the file if any value changed since it was opened.
    ///
    /// # Errors
    ///
    /// Filesystem write failures.
    pub fn save(&mut self) -> Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }
        let raw = serde_json::to_string_pretty(self.items.items()).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, raw).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), keys = self.items.items().len(), "storage saved");
        self.dirty = false;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if self.items.items().get(key).map(String::as_str) != Some(value) {
            self.items.set_item(key, value);
            self.dirty = true;
        }
    }

    fn remove_item(&mut self, key: &str) {
        if self.items.items().contains_key(key) {
            self.items.remove_item(key);
            self.dirty = true;
        }
    }
}
