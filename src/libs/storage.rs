//! Durable key/value storage for client state.
//!
//! The client persists exactly three keys: the bearer `token`, the serialized
//! `user` and the `themeMode` preference. [`FileStorage`] keeps one file per key
//! inside the application data directory, the same way API session identifiers
//! are cached on disk. [`MemoryStorage`] is the in-process variant used by tests
//! and embedders that do not want to touch the filesystem.

use super::data_storage::DataStorage;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const THEME_MODE_KEY: &str = "themeMode";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage key '{key}' could not be read: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("storage key '{key}' could not be written: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("storage key '{key}' could not be removed: {source}")]
    Remove {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("storage directory is unavailable: {0}")]
    Unavailable(String),
}

/// String key/value storage that survives process restarts.
///
/// Implementations must be safe to share between the session store and the
/// HTTP adapter, hence the `Send + Sync` bound.
pub trait Storage: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted in the platform data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let storage = DataStorage::new();
        // get_path creates the directory when it is missing
        storage.get_path(TOKEN_KEY).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self::new(storage.base_path()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            let mut file = fs::OpenOptions::new().write(true).create(true).truncate(true).open(self.path(key))?;
            file.write_all(value.as_bytes())
        };
        write().map_err(|source| StorageError::Write { key: key.to_string(), source })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { key: key.to_string(), source }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key, sorted. Handy for asserting on cleared state.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().remove(key);
        Ok(())
    }
}
