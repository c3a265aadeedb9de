//! Key-value contract and typed wrapper with automatic serialization.

use std::fmt;
use std::sync::Arc;

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// A byte-oriented key-value store.
///
/// All methods take `&self`; backends use interior mutability so a single
/// store can be shared behind an `Arc`.
pub trait KvStore: Send + Sync + fmt::Debug {
    /// Get the raw bytes for a key, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Insert or overwrite a key.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove a key. Succeeds even if the key did not exist.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
}

impl Cache {
    /// Wrap a backend.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::new(MemoryStore::new());
    /// ```
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wrap a backend that is also held elsewhere.
    pub fn from_shared(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and
    /// [`CacheError::SerializeError`] if the stored bytes don't decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<Item>> = cache.get("grtCart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous payload.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Get the raw stored bytes.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.store.get(key)
    }

    /// Store raw bytes without serialization.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.store.set(key, bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("grtCart", session_id);
/// // Returns "grtCart:sess_abc"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u32,
        name: String,
    }

    #[test]
    fn test_typed_get_set() {
        let cache = Cache::new(MemoryStore::new());
        let items = vec![Item {
            id: 1,
            name: "Bulb".to_string(),
        }];

        cache.set("grtCart", &items).unwrap();
        let loaded: Option<Vec<Item>> = cache.get("grtCart").unwrap();
        assert_eq!(loaded, Some(items));
    }

    #[test]
    fn test_get_missing_key() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Vec<Item>> = cache.get("nothing").unwrap();
        assert!(loaded.is_none());
        assert!(!cache.exists("nothing").unwrap());
    }

    #[test]
    fn test_corrupt_payload_is_serialize_error() {
        let cache = Cache::new(MemoryStore::new());
        cache.set_raw("grtCart", b"{not json").unwrap();

        let err = cache.get::<Vec<Item>>("grtCart").unwrap_err();
        assert!(err.is_corrupt_payload());
    }

    #[test]
    fn test_shared_backend_sees_writes() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::from_shared(store.clone());

        cache.set("k", &42u32).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"42".to_vec()));
    }

    #[test]
    fn test_cache_key_macro() {
        let key = cache_key!("grtCart", "sess_1");
        assert_eq!(key, "grtCart:sess_1");

        let key = cache_key!("cart", 7, "v2");
        assert_eq!(key, "cart:7:v2");
    }
}
