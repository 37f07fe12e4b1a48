// src/cache/store.rs
//! Key-value persistence substrate for cached hex data

use crate::error::{Result, HexError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Atomic single-key persistence primitives.
///
/// Implementations offer no multi-key transactions; the cache sequences its
/// prune-then-write steps on top of these and accepts that a crash between
/// them self-heals as a miss on the next lookup. `remove` of a missing key
/// succeeds, so callers can retry freely.
pub trait CacheStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct StoreStats {
    pub entries: usize,
    pub disk_size_mb: f64,
}

/// File-backed store: one file per key under a cache directory.
///
/// The literal key string is the file name, so keys must not contain path
/// separators; the cache's key grammar guarantees that for its own keys.
#[derive(Clone)]
pub struct FileStore {
    cache_dir: PathBuf,
}

impl FileStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .map_err(|e| HexError::Storage(format!("Failed to create cache directory: {}", e)))?;

        Ok(Self { cache_dir })
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') {
            return Err(HexError::Storage(format!("Invalid store key: {:?}", key)));
        }
        Ok(self.cache_dir.join(key))
    }

    /// Entry count and disk usage of the store
    pub fn stats(&self) -> Result<StoreStats> {
        let mut entries = 0;
        let mut bytes = 0u64;

        let dir = std::fs::read_dir(&self.cache_dir)
            .map_err(|e| HexError::Storage(format!("Failed to read cache directory: {}", e)))?;
        for entry in dir.flatten() {
            if let Ok(metadata) = entry.metadata() {
                if metadata.is_file() {
                    entries += 1;
                    bytes += metadata.len();
                }
            }
        }

        Ok(StoreStats {
            entries,
            disk_size_mb: bytes as f64 / 1_048_576.0,
        })
    }
}

impl CacheStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HexError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        std::fs::write(&path, value)
            .map_err(|e| HexError::Storage(format!("Failed to write {}: {}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HexError::Storage(format!("Failed to remove {}: {}", key, e))),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let dir = std::fs::read_dir(&self.cache_dir)
            .map_err(|e| HexError::Storage(format!("Failed to read cache directory: {}", e)))?;

        let mut keys = Vec::new();
        for entry in dir.flatten() {
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                if let Some(name) = entry.file_name().to_str() {
                    keys.push(name.to_string());
                }
            }
        }
        Ok(keys)
    }
}

/// In-memory store. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }
}
