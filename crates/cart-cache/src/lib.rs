//! Type-safe key-value persistence layer for the storefront cart.
//!
//! Provides a small [`KeyValueStore`] interface with interchangeable
//! backends and a [`Cache`] wrapper with automatic JSON serialization.
//!
//! - [`MemoryStore`]: in-memory, shared between clones
//! - [`FileStore`]: one file per key, for native development
//! - `SpinStore`: Spin's Key-Value Store (`wasm32` only)
//!
//! # Example
//!
//! ```rust,ignore
//! use cart_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<StoredItem>> = cache.get("cart")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
