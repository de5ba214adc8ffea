//! Key-value persistence for pinned item sets.
//!
//! Values are whole JSON documents: a `set` replaces whatever was stored under
//! the key, and a `get` returns the last written value verbatim.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The browser exposes no `localStorage` (private mode, sandboxed frame).
    Unavailable,
    /// The browser refused the write, usually because the quota is exhausted.
    WriteRejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "Local storage is not available"),
            StorageError::WriteRejected(reason) => {
                write!(f, "Local storage rejected the write: {}", reason)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// A string-keyed store holding serialized pinned sets.
pub trait PinStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, scoped to the page origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        gloo_utils::window().local_storage().ok().flatten()
    }
}

impl PinStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(format!("{:?}", e)))
    }
}

/// In-memory store. Clones share the same map, so a clone handed to an engine
/// can be inspected from the outside.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PinStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_replaces_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.set("a", "[1]").unwrap();
        store.set("a", "[2]").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("[2]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set("pinned-races-2023", "[]").unwrap();
        assert_eq!(store.get("pinned-races-2023").as_deref(), Some("[]"));
        assert_eq!(store.get("pinned-races-2022"), None);
    }
}
