//! Durable storage of cart contents.
//!
//! The store only sees the [`CartPersistence`] contract. [`KvCartPersistence`]
//! implements it over any `grt-cache` backend by keeping the whole cart as a
//! JSON array under a single key.

use grt_cache::{Cache, CacheError, SessionId};

use crate::cart::CartState;

/// Key the cart payload is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "grtCart";

/// Load/save contract used by [`CartStore`](crate::CartStore).
pub trait CartPersistence: Send + Sync {
    /// Read the stored cart.
    ///
    /// Never fails: a missing, unreadable or malformed payload yields an
    /// empty cart.
    fn load(&self) -> CartState;

    /// Overwrite the stored cart with `state`.
    fn save(&self, state: &CartState) -> Result<(), CacheError>;
}

/// [`CartPersistence`] over a key-value [`Cache`].
#[derive(Debug, Clone)]
pub struct KvCartPersistence {
    cache: Cache,
    key: String,
}

impl KvCartPersistence {
    /// Store under [`DEFAULT_STORAGE_KEY`].
    pub fn new(cache: Cache) -> Self {
        Self::with_key(cache, DEFAULT_STORAGE_KEY)
    }

    /// Store under a custom key.
    pub fn with_key(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// Store under `grtCart:<session>`.
    pub fn for_session(cache: Cache, session: &SessionId) -> Self {
        Self::with_key(cache, session.scoped_key(DEFAULT_STORAGE_KEY))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }
}

impl CartPersistence for KvCartPersistence {
    fn load(&self) -> CartState {
        match self.cache.get::<CartState>(&self.key) {
            Ok(Some(state)) => {
                tracing::debug!(key = %self.key, lines = state.len(), "restored cart");
                state
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored cart");
                CartState::new()
            }
            Err(e) if e.is_corrupt_payload() => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable cart payload");
                CartState::new()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "cart storage read failed, starting empty");
                CartState::new()
            }
        }
    }

    fn save(&self, state: &CartState) -> Result<(), CacheError> {
        self.cache.set(&self.key, state)?;
        tracing::trace!(key = %self.key, lines = state.len(), "saved cart");
        Ok(())
    }
}
