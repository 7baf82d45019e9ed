//! # Key-Value Store
//!
//! The async storage contract and its two implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KvStore Implementations                            │
//! │                                                                         │
//! │  JsonFileKv            one <key>.json file per key under a data dir     │
//! │                        writes are atomic (temp file + rename)           │
//! │                                                                         │
//! │  MemoryKv              HashMap behind a mutex; nothing survives a       │
//! │                        restart — tests and web fallback only            │
//! │                                                                         │
//! │  Both tolerate being called before anything was ever written: a get     │
//! │  on a missing key is Ok(None), a remove is a no-op.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// KvStore Trait
// =============================================================================

/// Async get/set/remove on named keys.
///
/// Values are JSON documents; typed encoding lives in [`crate::storage`].
/// Implementations must return `Ok(None)` for keys never written, rather
/// than erroring.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetches the value for a key, `None` if absent.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores a value under a key, overwriting any previous value.
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Deletes a key. No-op if absent.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Durable store: one `<key>.json` file per key under a data directory.
///
/// The directory is created on first write. Writes go to a temp file which
/// is then renamed over the target, so a crash mid-write never leaves a
/// half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct JsonFileKv {
    dir: PathBuf,
}

impl JsonFileKv {
    /// Creates a store rooted at the given data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileKv { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStore for JsonFileKv {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(key, path = %path.display(), "loaded value");
                Ok(Some(serde_json::from_str(&content)?))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(&value)?;

        // Write atomically: temp file, then rename over the target
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &json).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        debug!(key, path = %path.display(), "saved value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "removed key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Volatile store backed by a `HashMap`. Used by tests and as a fallback
/// when no durable directory is available.
#[derive(Debug, Default)]
pub struct MemoryKv {
    map: Mutex<HashMap<String, Value>>,
}

impl MemoryKv {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let map = self.map.lock().expect("kv mutex poisoned");
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        let mut map = self.map.lock().expect("kv mutex poisoned");
        map.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut map = self.map.lock().expect("kv mutex poisoned");
        map.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_kv_roundtrip() {
        let kv = MemoryKv::new();

        assert!(kv.get("k").await.unwrap().is_none());

        kv.set("k", json!([1, 2, 3])).await.unwrap();
        assert_eq!(kv.get("k").await.unwrap(), Some(json!([1, 2, 3])));

        kv.remove("k").await.unwrap();
        assert!(kv.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_kv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path());

        kv.set("carrito_productos", json!([{ "name": "Shirt" }]))
            .await
            .unwrap();

        assert_eq!(
            kv.get("carrito_productos").await.unwrap(),
            Some(json!([{ "name": "Shirt" }]))
        );
        assert!(dir.path().join("carrito_productos.json").exists());
    }

    #[tokio::test]
    async fn test_file_kv_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path());

        assert!(kv.get("nunca_escrito").await.unwrap().is_none());
        // Remove of a missing key is a no-op, not an error
        kv.remove("nunca_escrito").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_kv_set_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path());

        kv.set("k", json!(1)).await.unwrap();
        kv.set("k", json!(2)).await.unwrap();
        assert_eq!(kv.get("k").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_file_kv_remove_deletes_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path());

        kv.set("k", json!(true)).await.unwrap();
        kv.remove("k").await.unwrap();

        assert!(!dir.path().join("k.json").exists());
        assert!(kv.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_kv_works_before_dir_exists() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path().join("anidado/datos"));

        // Reads before any write: absent, not an error
        assert!(kv.get("k").await.unwrap().is_none());

        // First write creates the directory chain
        kv.set("k", json!("v")).await.unwrap();
        assert_eq!(kv.get("k").await.unwrap(), Some(json!("v")));
    }
}
