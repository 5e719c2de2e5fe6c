//! Tab-scoped key/value storage behind the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! In the browser this is `window.sessionStorage` (see `crate::browser`);
//! native builds and tests use [`MemoryStore`]. Access is synchronous and
//! single-threaded, so implementations use interior mutability behind `&self`.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

/// Errors raised when the backing store refuses a write.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StorageError {
    /// No storage area is reachable (no window, storage disabled by policy).
    #[error("session storage unavailable")]
    Unavailable,

    /// The store rejected a write, typically a quota failure.
    #[error("failed to write {key}: {message}")]
    Write { key: String, message: String },
}

/// Synchronous string key/value store scoped to one browser tab.
pub trait KeyValueStore {
    /// Read a value. Unreadable entries read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite `key` with `value` in a single step.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store is unreachable.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key in this store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store is unreachable.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-process store used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}
