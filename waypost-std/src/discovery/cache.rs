//! Persistence for the discovery cache.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Key holding the application version the cached list was written for.
pub const VERSION_KEY: &str = "waypost.discovery.version";

/// Key holding the cached list of discovered type names.
pub const TYPES_KEY: &str = "waypost.discovery.types";

/// A small key/value store that survives restarts.
///
/// Hosts back this with whatever the platform offers (user defaults, a
/// preferences file, a database row). Writes are best effort.
pub trait PersistentStore: Send + Sync {
    /// Read a string value.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Read a list value.
    fn get_list(&self, key: &str) -> Option<Vec<String>>;

    /// Write a string value.
    fn set_string(&self, key: &str, value: &str);

    /// Write a list value.
    fn set_list(&self, key: &str, value: &[String]);

    /// Remove a key of either kind.
    fn remove(&self, key: &str);
}

impl<T: PersistentStore + ?Sized> PersistentStore for std::sync::Arc<T> {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        (**self).get_list(key)
    }

    fn set_string(&self, key: &str, value: &str) {
        (**self).set_string(key, value)
    }

    fn set_list(&self, key: &str, value: &[String]) {
        (**self).set_list(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone)]
enum Value {
    String(String),
    List(Vec<String>),
}

/// An in-process [`PersistentStore`].
///
/// Nothing survives the process; useful in tests and for hosts that do not
/// want the cache.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl PersistentStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.read().get(key) {
            Some(Value::String(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn get_list(&self, key: &str) -> Option<Vec<String>> {
        match self.values.read().get(key) {
            Some(Value::List(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn set_string(&self, key: &str, value: &str) {
        self.values
            .write()
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    fn set_list(&self, key: &str, value: &[String]) {
        self.values
            .write()
            .insert(key.to_string(), Value::List(value.to_vec()));
    }

    fn remove(&self, key: &str) {
        self.values.write().remove(key);
    }
}
