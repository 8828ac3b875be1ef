//! File-backed key-value store.
//!
//! Each key is stored as one file under a root directory. Used for native
//! development where no browser or Spin store is available.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CacheError, KeyValueStore};

const EXTENSION: &str = "json";

/// Key-value store that keeps one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            CacheError::OpenError(format!("{}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    /// The directory holding the store files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", file_stem(key), EXTENSION))
    }
}

/// Map a key to a file stem. Bytes outside `[A-Za-z0-9_-]` become `%XX`,
/// so distinct keys never share a file.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => stem.push(byte as char),
            _ => stem.push_str(&format!("%{:02X}", byte)),
        }
    }
    stem
}

/// Inverse of [`file_stem`]. `None` for names this store did not write.
fn key_from_stem(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    String::from_utf8(bytes).ok()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        // Write then rename so readers never see a half-written value.
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(key_from_stem)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn temp_root(name: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "cart-cache-{}-{}-{}",
            name,
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_set_get_delete() {
        let root = temp_root("roundtrip");
        let store = FileStore::open(&root).unwrap();

        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));
        assert!(store.exists("cart").unwrap());
        assert_eq!(store.keys().unwrap(), vec!["cart"]);

        store.delete("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.delete("cart").unwrap();

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_keys_are_encoded() {
        let root = temp_root("encode");
        let store = FileStore::open(&root).unwrap();

        store.set("cart:home/../x", b"1").unwrap();
        assert!(root.join("cart%3Ahome%2F%2E%2E%2Fx.json").exists());
        assert_eq!(store.get("cart:home/../x").unwrap(), Some(b"1".to_vec()));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_similar_keys_do_not_collide() {
        let root = temp_root("collide");
        let store = FileStore::open(&root).unwrap();

        store.set("cart:home", b"[1]").unwrap();
        store.set("cart_home", b"[2]").unwrap();
        store.set("cart%3Ahome", b"[3]").unwrap();

        assert_eq!(store.get("cart:home").unwrap(), Some(b"[1]".to_vec()));
        assert_eq!(store.get("cart_home").unwrap(), Some(b"[2]".to_vec()));
        assert_eq!(store.get("cart%3Ahome").unwrap(), Some(b"[3]".to_vec()));

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["cart%3Ahome", "cart:home", "cart_home"]);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_stem_round_trip() {
        for key in ["cart", "cart:home", "keranjang belanja", "ü.json", "%"] {
            assert_eq!(key_from_stem(&file_stem(key)).as_deref(), Some(key));
        }
        assert_eq!(key_from_stem("bad%4"), None);
        assert_eq!(key_from_stem("bad%zz"), None);
    }
}
