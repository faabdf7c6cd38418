//! Key-value storage backends for the proof store.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
};

use crate::error::Result;

/// String values addressed by key. A missing key means "never written".
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the whole value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory storage, used by tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                tracing::debug!("Read {} bytes from {}", value.len(), path.display());
                Ok(Some(value))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, value)?;
        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        storage.set("k", "w").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn test_file_storage_creates_directory_on_write() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(tmp.path().join("nested/data"));

        assert_eq!(storage.get("db").unwrap(), None);
        storage.set("db", "[]").unwrap();

        assert!(tmp.path().join("nested/data/db.json").exists());
        assert_eq!(storage.get("db").unwrap().as_deref(), Some("[]"));
    }
}
