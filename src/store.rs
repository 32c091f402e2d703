//! Persisted preference slot and the environment color-scheme signal.
//!
//! The browser implementations live in the `web` module. [`MemoryStore`] and
//! [`FixedScheme`] stand in for them off the browser.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

/// Per-origin key/value storage for user preferences.
pub trait PreferenceStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage cannot be accessed.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage cannot be accessed.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reports whether the operating environment prefers a dark color scheme.
pub trait ColorScheme {
    fn prefers_dark(&self) -> bool;
}

/// In-memory preference store. Clones share the same entries, so a test can
/// keep a handle and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    disabled: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every read and write, like a browser with
    /// storage blocked.
    #[must_use]
    pub fn disabled() -> Self {
        Self { disabled: true, ..Self::default() }
    }

    /// Pre-populate `key` with `value`.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self
    }

    /// Current value under `key`, bypassing the disabled flag.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A color-scheme signal with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedScheme(pub bool);

impl ColorScheme for FixedScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}
