//! The persistent key-value store boundary beneath the TTL cache.
//!
//! The store makes no guarantees beyond single-key operations, and the host
//! may evict values at any time — a surprise miss is a normal cache-cold
//! state, never an error. Reads therefore return `Option` and collapse every
//! failure mode into a miss; only writes report I/O errors, and the cache
//! layer above absorbs those too.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// String-keyed byte store. Values survive process restarts for the
/// file-backed implementation.
pub trait KvStore: Send + Sync {
    /// Read raw bytes. Any failure (missing file, permission, corruption at
    /// the filesystem level) is a miss.
    fn get_raw(&self, key: &str) -> Option<Vec<u8>>;

    fn set_raw(&self, key: &str, bytes: &[u8]) -> std::io::Result<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete_raw(&self, key: &str) -> std::io::Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for std::sync::Arc<S> {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        (**self).set_raw(key, bytes)
    }

    fn delete_raw(&self, key: &str) -> std::io::Result<()> {
        (**self).delete_raw(key)
    }
}

/// File-backed store: one JSON file per sanitized key under a cache directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Map a cache key to a filename, replacing anything outside
    /// `[A-Za-z0-9._-]` with `_` so keys can never escape the cache dir.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl KvStore for FileStore {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path_for(key)).ok()
    }

    fn set_raw(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), bytes)
    }

    fn delete_raw(&self, key: &str) -> std::io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store. Used in tests and anywhere persistence is unwanted.
#[derive(Default)]
pub struct MemStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set_raw(&self, key: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.entries
            .lock()
            .map_err(|_| std::io::Error::other("store mutex poisoned"))?
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> std::io::Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        Ok(())
    }
}
