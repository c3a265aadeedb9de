//! Key-value storage layer for the GRT cart.
//!
//! Provides a small [`KvStore`] contract with two backends and a typed
//! [`Cache`] wrapper that handles JSON serialization:
//!
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral carts
//! - [`FileStore`]: one file per key inside a directory
//!
//! # Example
//!
//! ```rust,ignore
//! use grt_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open("./.grt")?);
//!
//! // Store a value
//! cache.set("grtCart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<Item>> = cache.get("grtCart")?;
//!
//! // Delete a value
//! cache.delete("grtCart")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod session;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;
pub use session::SessionId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, SessionId};
}
