use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{AppError, AppResult};

/// Keys of the durable client-side records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Id of the last selected profile
    ActiveProfile,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKey::ActiveProfile => write!(f, "cinevault_user_id"),
        }
    }
}

/// Durable key/value storage that survives restarts
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>>;

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()>;

    fn remove(&self, key: StorageKey) -> AppResult<()>;
}

/// Storage backed by a JSON object in a single file
///
/// A missing file reads as empty; the parent directory is created on first write.
pub struct FileStorage {
    path: PathBuf,
    // serializes every access to the file
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AppResult<HashMap<String, String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            AppError::Storage(format!("Corrupt storage file {}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(format!("Storage serialization error: {}", e)))?;

        // readers see either the old file or the new one, never a partial write
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::Storage("storage lock poisoned".to_string()))
    }

    fn update<F>(&self, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self.lock()?;

        let mut entries = self.read_all()?;
        apply(&mut entries);
        self.write_all(&entries)
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        let _guard = self.lock()?;
        Ok(self.read_all()?.remove(&key.to_string()))
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: StorageKey) -> AppResult<()> {
        self.update(|entries| {
            entries.remove(&key.to_string());
        })
    }
}

/// In-process storage for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> AppResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Storage("storage lock poisoned".to_string()))
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        Ok(self.entries()?.get(&key.to_string()).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> AppResult<()> {
        self.entries()?.remove(&key.to_string());
        Ok(())
    }
}
