//! Cart persistence over a key-value store.

use cart_cache::{Cache, KeyValueStore};
use cart_observability::StructuredLogger;

use crate::cart::{Cart, CartStorage};
use crate::error::CartError;

/// Default storage key, shared with the storefront page script.
pub const DEFAULT_CART_KEY: &str = "cart";

/// [`CartStorage`] keeping the cart as JSON under one key.
pub struct KvCartStorage<S> {
    cache: Cache<S>,
    key: String,
    logger: StructuredLogger,
}

impl<S: KeyValueStore> KvCartStorage<S> {
    /// Store the cart under [`DEFAULT_CART_KEY`].
    pub fn new(store: S, logger: StructuredLogger) -> Self {
        Self::with_key(store, DEFAULT_CART_KEY, logger)
    }

    /// Store the cart under `key`.
    pub fn with_key(store: S, key: impl Into<String>, logger: StructuredLogger) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
            logger,
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }
}

impl<S: KeyValueStore> CartStorage for KvCartStorage<S> {
    fn load(&self) -> Cart {
        let entries = match self.cache.get::<Vec<serde_json::Value>>(&self.key) {
            Ok(Some(entries)) => entries,
            Ok(None) => return Cart::new(),
            Err(e) if e.is_corrupt() => {
                self.logger
                    .warn_builder("stored cart unreadable, starting empty")
                    .field("key", self.key.as_str())
                    .field("error", e.to_string())
                    .emit();
                return Cart::new();
            }
            Err(e) => {
                self.logger
                    .error_builder("failed to read stored cart, starting empty")
                    .field("key", self.key.as_str())
                    .field("error", e.to_string())
                    .emit();
                return Cart::new();
            }
        };

        let (cart, repairs) = Cart::restore(entries);
        for repair in &repairs {
            self.logger
                .warn_builder("repaired stored cart")
                .field("key", self.key.as_str())
                .field("repair", repair.to_string())
                .emit();
        }
        cart
    }

    fn save(&self, cart: &Cart) -> Result<(), CartError> {
        self.cache.set(&self.key, cart)?;
        Ok(())
    }
}
