//! Key → JSON-blob persistence for app state.
//!
//! Each key maps to one JSON document. The backend is injected so the app
//! can run against the platform data directory while tests run against an
//! in-memory map. Loading is forgiving: a missing or corrupt document reads
//! back as `None` and the caller falls back to defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

/// Raw string storage underneath [`Store`].
pub trait StoreBackend {
    /// Read the blob for `key`, `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, String>;
    /// Write the blob for `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// Backend keeping one `<key>.json` file per key in a single directory.
pub struct DiskBackend {
    dir: PathBuf,
}

impl DiskBackend {
    /// Open (and create) the platform data directory for the app.
    pub fn open_default() -> Result<Self, String> {
        let dirs = directories::ProjectDirs::from("", "", "weekline")
            .ok_or_else(|| "No home directory available".to_string())?;
        Self::open(dirs.data_dir().to_path_buf())
    }

    pub fn open(dir: PathBuf) -> Result<Self, String> {
        std::fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StoreBackend for DiskBackend {
    fn read(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| e.to_string())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
        std::fs::write(self.path_for(key), value).map_err(|e| e.to_string())
    }
}

/// Typed facade over a backend.
pub struct Store {
    backend: Box<dyn StoreBackend>,
}

impl Store {
    pub fn new(backend: Box<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Load and decode the value under `key`. Missing or undecodable data
    /// yields `None` so a damaged file never takes the app down.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.backend.read(key) {
            Ok(Some(json)) => serde_json::from_str(&json).ok(),
            Ok(None) => None,
            Err(e) => {
                eprintln!("Failed to read '{}': {}", key, e);
                None
            }
        }
    }

    /// Encode and persist `value` under `key`.
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), String> {
        let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
        self.backend.write(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory backend for tests.
    #[derive(Default)]
    struct MemoryBackend {
        blobs: HashMap<String, String>,
    }

    impl StoreBackend for MemoryBackend {
        fn read(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.blobs.get(key).cloned())
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), String> {
            self.blobs.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn saved_values_load_back() {
        let mut store = Store::new(Box::<MemoryBackend>::default());
        store.save("numbers", &vec![1, 2, 3]).unwrap();
        let numbers: Option<Vec<i32>> = store.load("numbers");
        assert_eq!(numbers, Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let store = Store::new(Box::<MemoryBackend>::default());
        let value: Option<Vec<i32>> = store.load("nothing");
        assert!(value.is_none());
    }

    #[test]
    fn corrupt_blob_loads_as_none() {
        let mut backend = MemoryBackend::default();
        backend.write("tasks", "{not json").unwrap();
        let store = Store::new(Box::new(backend));
        let value: Option<Vec<i32>> = store.load("tasks");
        assert!(value.is_none());
    }

    #[test]
    fn save_overwrites_the_previous_blob() {
        let mut store = Store::new(Box::<MemoryBackend>::default());
        store.save("k", &"old").unwrap();
        store.save("k", &"new").unwrap();
        assert_eq!(store.load::<String>("k"), Some("new".to_string()));
    }
}
