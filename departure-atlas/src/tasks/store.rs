//! Key-value storage for persisted text values.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use super::TaskError;

/// String values stored under string keys.
pub trait KeyValueStore {
    /// The value under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, TaskError>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: String) -> Result<(), TaskError>;
}

/// In-memory store (for tests).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TaskError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), TaskError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a JSON object file mapping keys to strings.
///
/// The file is read on every `get` and rewritten on every `set`. A missing
/// file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, TaskError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|e| TaskError::Corrupt {
            message: format!("store file {:?}: {}", self.path, e),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TaskError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), TaskError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);

        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&entries).map_err(|e| TaskError::Corrupt {
            message: format!("failed to serialize store: {e}"),
        })?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
