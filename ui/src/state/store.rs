//! Key-value persistence backends
//!
//! Browser local storage in production, an in-memory map in tests. Values
//! are opaque strings; callers own the serialization.

use gloo_storage::{LocalStorage, Storage};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::warn;

/// Narrow persistence interface for table view state
pub trait StateStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Store backed by browser local storage
#[derive(Default)]
pub struct BrowserStore;

impl BrowserStore {
    pub fn new() -> Self {
        Self
    }
}

impl StateStore for BrowserStore {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value.to_string()) {
            warn!(key, error = %err, "failed to persist view state");
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Store over a plain map, shared by clone
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value, exactly as written
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl StateStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.raw(key)
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
