//! Query parameters and caller context.

use std::{any::Any, fmt, sync::Arc};

/// Ordered string key/value bag decoded from a query string.
///
/// Keys keep the position of their first insertion; [`Parameters::set`]
/// overwrites the value of an existing key in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: Vec<(String, String)>,
}

impl Parameters {
    /// Create an empty parameter bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`Parameters::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Get the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Opaque caller-supplied value passed through to factories and the
/// interrupt hook.
///
/// The router never inspects it. Consumers recover the concrete type with
/// [`Context::downcast_ref`].
#[derive(Clone)]
pub struct Context(Arc<dyn Any + Send + Sync>);

impl Context {
    /// Wrap an arbitrary value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the inner value as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Check whether the inner value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut params = Parameters::new();
        params.set("a", "1");
        params.set("b", "2");
        params.set("a", "3");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("3"));
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_context_downcast() {
        #[derive(Debug, PartialEq)]
        struct User {
            id: u64,
        }

        let ctx = Context::new(User { id: 7 });
        assert!(ctx.is::<User>());
        assert_eq!(ctx.downcast_ref::<User>(), Some(&User { id: 7 }));
        assert!(ctx.downcast_ref::<String>().is_none());
    }
}
