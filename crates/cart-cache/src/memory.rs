//! In-memory key-value store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{CacheError, KeyValueStore};

/// Key-value store held in memory.
///
/// Clones share the same underlying map, so a page can hand one handle to
/// the cart and keep another to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a UTF-8 value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.into(), value.into().into_bytes());
        store
    }

    /// Read a value as UTF-8 text.
    pub fn get_text(&self, key: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.borrow().contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("cart", b"[]").unwrap();
        assert_eq!(handle.get_text("cart").as_deref(), Some("[]"));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_last_writer_wins() {
        let store = MemoryStore::with_entry("cart", "[1]");
        store.set("cart", b"[2]").unwrap();
        assert_eq!(store.get_text("cart").as_deref(), Some("[2]"));
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryStore::new();
        store.set("b", b"1").unwrap();
        store.set("a", b"2").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }
}
