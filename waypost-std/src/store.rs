//! Pattern store: normalized pattern → factory.
//!
//! Lookup is an exact string match. There is no wildcard, prefix or
//! parameter-segment matching; query parameters carry all the variability.

use parking_lot::RwLock;
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::debug;
use waypost_core::{ComponentFactory, IntoPattern, Pattern, Scheme};

/// A registered factory and the pattern it declares for itself.
#[derive(Clone)]
struct Entry {
    factory: Arc<dyn ComponentFactory>,
    declared: Pattern,
}

#[derive(Default)]
struct Inner {
    scheme: Option<Scheme>,
    entries: HashMap<Pattern, Entry>,
}

/// Thread-safe registry of route factories.
///
/// Patterns are normalized with the store's scheme on the way in, so
/// `"profile"` and `"myapp://profile"` name the same entry once the scheme
/// `myapp` is configured. Registering a pattern twice keeps the newest
/// factory.
#[derive(Default)]
pub struct PatternStore {
    inner: RwLock<Inner>,
}

impl PatternStore {
    /// Create an empty store without a scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that normalizes with `scheme`.
    pub fn with_scheme(scheme: Scheme) -> Self {
        Self {
            inner: RwLock::new(Inner {
                scheme: Some(scheme),
                entries: HashMap::new(),
            }),
        }
    }

    /// The scheme used for normalization.
    pub fn scheme(&self) -> Option<Scheme> {
        self.inner.read().scheme.clone()
    }

    /// Replace the scheme. Entries registered earlier keep their keys.
    pub fn set_scheme(&self, scheme: Option<Scheme>) {
        self.inner.write().scheme = scheme;
    }

    /// Normalize `pattern` with the current scheme.
    pub fn normalize(&self, pattern: impl IntoPattern) -> Pattern {
        let inner = self.inner.read();
        pattern.into_pattern().normalized(inner.scheme.as_ref())
    }

    /// Register `factory` under `pattern`, replacing any previous factory.
    ///
    /// The factory's own methods run outside the lock, so a factory may
    /// query the store while it is being registered.
    pub fn register(&self, pattern: impl IntoPattern, factory: Arc<dyn ComponentFactory>) {
        let scheme = self.scheme();
        let key = pattern.into_pattern().normalized(scheme.as_ref());
        let declared = factory
            .declared_pattern()
            .map(|p| p.normalized(scheme.as_ref()))
            .unwrap_or_else(|| key.clone());

        debug!(pattern = %key, factory = factory.name(), "registering route");
        let previous = self
            .inner
            .write()
            .entries
            .insert(key.clone(), Entry { factory, declared });
        if let Some(previous) = previous {
            debug!(pattern = %key, replaced = previous.factory.name(), "route overwritten");
        }
    }

    /// Exact-match lookup of an already normalized pattern.
    pub fn lookup(&self, pattern: &str) -> Option<Arc<dyn ComponentFactory>> {
        let key = Pattern::new(pattern);
        self.inner
            .read()
            .entries
            .get(&key)
            .map(|entry| Arc::clone(&entry.factory))
    }

    /// Check whether any entry declares `pattern`.
    ///
    /// Compares against each factory's declared pattern rather than the key
    /// it was registered under.
    pub fn contains(&self, pattern: impl IntoPattern) -> bool {
        let inner = self.inner.read();
        let pattern = pattern.into_pattern().normalized(inner.scheme.as_ref());
        inner.entries.values().any(|entry| entry.declared == pattern)
    }

    /// Snapshot of registered keys, sorted.
    pub fn patterns(&self) -> Vec<Pattern> {
        let mut patterns: Vec<_> = self.inner.read().entries.keys().cloned().collect();
        patterns.sort();
        patterns
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Remove every entry. The scheme is kept.
    pub fn clear(&self) {
        self.inner.write().entries.clear();
    }
}

impl fmt::Debug for PatternStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("PatternStore")
            .field("scheme", &inner.scheme)
            .field("len", &inner.entries.len())
            .finish()
    }
}
