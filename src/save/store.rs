//! String-keyed persistent stores.
//!
//! The save layer talks to a browser-style key-value store through
//! [`KvStore`]: get, set, remove by string key, with failures reported
//! as plain results rather than panics. [`MemoryStore`] backs tests and
//! ephemeral sessions, [`FileStore`] persists each key as a file on
//! disk.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// A persistent string-keyed store.
///
/// Implementations must never panic on failure: a full or broken store
/// reports `false` from [`KvStore::set`] and the caller degrades to a
/// no-op.
pub trait KvStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Returns `false` when the store refuses the write.
    fn set(&mut self, key: &str, value: &str) -> bool;

    /// Remove the value stored under `key`.
    ///
    /// Returns `true` when a value was present.
    fn remove(&mut self, key: &str) -> bool;
}

/// In-memory store with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses writes once keys plus values would
    /// exceed `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if let Some(quota) = self.quota_bytes {
            let used = self.used_bytes_without(key);
            if used + key.len() + value.len() > quota {
                return false;
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }
}

/// Directory-backed store: one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on the
    /// first write, not here.
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys become file names, so anything path-hostile is replaced.
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if fs::create_dir_all(&self.dir).is_err() {
            return false;
        }
        fs::write(self.path_for(key), value).is_ok()
    }

    fn remove(&mut self, key: &str) -> bool {
        fs::remove_file(self.path_for(key)).is_ok()
    }
}
