//! Bulk registration of components found at startup.
//!
//! A [`ComponentSource`] enumerates components together with their patterns
//! and factories. [`Discovery`] registers them into a [`Router`] and keeps the
//! list of discovered type names in a [`PersistentStore`] keyed by the
//! application version, so later launches of the same version look up only
//! the cached names instead of enumerating everything.
//!
//! # Cache protocol
//!
//! | stored version      | stored list | action                                |
//! |---------------------|-------------|---------------------------------------|
//! | equals running one  | non-empty   | register only the cached names         |
//! | anything else       | any         | full scan, then persist list + version |
//!
//! An empty running version disables the cache: every call scans and nothing
//! is persisted.

mod cache;
#[cfg(feature = "inventory")]
mod collected;

pub use cache::{MemoryStore, PersistentStore, TYPES_KEY, VERSION_KEY};
#[cfg(feature = "inventory")]
pub use collected::{ComponentRegistration, InventorySource};

use crate::router::Router;
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use tracing::debug;
use waypost_core::{ComponentFactory, IntoPattern, Pattern};

/// A component found by a [`ComponentSource`].
#[derive(Clone)]
pub struct DiscoveredComponent {
    /// Fully qualified type name, the cache key.
    pub type_name: String,
    /// Pattern to register under.
    pub pattern: Pattern,
    /// The component's factory.
    pub factory: Arc<dyn ComponentFactory>,
}

impl fmt::Debug for DiscoveredComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveredComponent")
            .field("type_name", &self.type_name)
            .field("pattern", &self.pattern)
            .field("factory", &self.factory.name())
            .finish()
    }
}

/// Enumerates routable components.
pub trait ComponentSource: Send + Sync {
    /// Every component, in a stable order.
    fn components(&self) -> Vec<DiscoveredComponent>;

    /// Look up one component by type name.
    fn find(&self, type_name: &str) -> Option<DiscoveredComponent> {
        self.components()
            .into_iter()
            .find(|component| component.type_name == type_name)
    }
}

/// A hand-written list of components.
#[derive(Default)]
pub struct StaticSource {
    entries: Vec<DiscoveredComponent>,
    scans: AtomicUsize,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component.
    pub fn with(
        mut self,
        type_name: impl Into<String>,
        pattern: impl IntoPattern,
        factory: Arc<dyn ComponentFactory>,
    ) -> Self {
        self.entries.push(DiscoveredComponent {
            type_name: type_name.into(),
            pattern: pattern.into_pattern(),
            factory,
        });
        self
    }

    /// How many full enumerations have been requested.
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl ComponentSource for StaticSource {
    fn components(&self) -> Vec<DiscoveredComponent> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.entries.clone()
    }

    fn find(&self, type_name: &str) -> Option<DiscoveredComponent> {
        self.entries
            .iter()
            .find(|component| component.type_name == type_name)
            .cloned()
    }
}

impl fmt::Debug for StaticSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticSource")
            .field("entries", &self.entries)
            .field("scans", &self.scans())
            .finish()
    }
}

/// What [`Discovery::auto_register_all`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Number of components registered.
    pub registered: usize,
    /// Whether the cached list was used instead of a full scan.
    pub from_cache: bool,
}

/// Registers the components of a source, caching their names per version.
#[derive(Debug)]
pub struct Discovery<S, P> {
    source: S,
    store: P,
}

impl<S: ComponentSource, P: PersistentStore> Discovery<S, P> {
    /// Create a discovery over `source`, caching into `store`.
    pub fn new(source: S, store: P) -> Self {
        Self { source, store }
    }

    /// The component source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cache store.
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Register every discoverable component into `router`.
    pub fn auto_register_all(&self, router: &Router, app_version: &str) -> DiscoveryReport {
        if !app_version.is_empty() {
            if let Some(cached) = self.cached_types(app_version) {
                let mut registered = 0;
                for type_name in &cached {
                    match self.source.find(type_name) {
                        Some(component) => {
                            register(router, component);
                            registered += 1;
                        }
                        None => {
                            debug!(type_name = %type_name, "cached component no longer exists")
                        }
                    }
                }
                debug!(app_version, registered, "registered components from cache");
                return DiscoveryReport {
                    registered,
                    from_cache: true,
                };
            }
        }

        let components = self.source.components();
        let type_names: Vec<String> = components.iter().map(|c| c.type_name.clone()).collect();
        let registered = components.len();
        for component in components {
            register(router, component);
        }
        debug!(app_version, registered, "registered components from full scan");

        if !app_version.is_empty() {
            self.store.set_list(TYPES_KEY, &type_names);
            self.store.set_string(VERSION_KEY, app_version);
        }
        DiscoveryReport {
            registered,
            from_cache: false,
        }
    }

    /// Forget the cached list and version.
    pub fn clear_register_cache(&self) {
        self.store.remove(TYPES_KEY);
        self.store.remove(VERSION_KEY);
    }

    fn cached_types(&self, app_version: &str) -> Option<Vec<String>> {
        let version = self.store.get_string(VERSION_KEY)?;
        if version != app_version {
            debug!(cached = %version, app_version, "discovery cache is stale");
            return None;
        }
        self.store.get_list(TYPES_KEY).filter(|types| !types.is_empty())
    }
}

fn register(router: &Router, component: DiscoveredComponent) {
    debug!(type_name = %component.type_name, pattern = %component.pattern, "discovered component");
    router.register_shared(component.pattern, component.factory);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingFactory, RecordingDisplay};

    fn source() -> StaticSource {
        StaticSource::new()
            .with("app::Home", "home", Arc::new(CountingFactory::new("Home")))
            .with("app::Profile", "profile", Arc::new(CountingFactory::new("Profile")))
    }

    fn router() -> Router {
        let router = Router::new(Arc::new(RecordingDisplay::new()));
        router.configure("myapp");
        router
    }

    #[test]
    fn test_first_launch_scans_and_persists() {
        let discovery = Discovery::new(source(), MemoryStore::new());
        let router = router();

        let report = discovery.auto_register_all(&router, "1.0");
        assert_eq!(
            report,
            DiscoveryReport {
                registered: 2,
                from_cache: false
            }
        );
        assert!(router.contains("home"));
        assert!(router.contains("profile"));
        assert_eq!(discovery.store().get_string(VERSION_KEY).as_deref(), Some("1.0"));
        assert_eq!(
            discovery.store().get_list(TYPES_KEY),
            Some(vec!["app::Home".to_string(), "app::Profile".to_string()])
        );
    }

    #[test]
    fn test_same_version_uses_cache() {
        let store = Arc::new(MemoryStore::new());
        store.set_string(VERSION_KEY, "1.0");
        store.set_list(TYPES_KEY, &["app::Profile".to_string()]);
        let discovery = Discovery::new(source(), store);
        let router = router();

        let report = discovery.auto_register_all(&router, "1.0");
        assert!(report.from_cache);
        assert_eq!(report.registered, 1);
        assert_eq!(discovery.source().scans(), 0);
        assert!(router.contains("profile"));
        assert!(!router.contains("home"));
    }

    #[test]
    fn test_version_change_rescans() {
        let discovery = Discovery::new(source(), MemoryStore::new());
        discovery.store().set_string(VERSION_KEY, "1.0");
        discovery.store().set_list(TYPES_KEY, &["app::Home".to_string()]);

        let report = discovery.auto_register_all(&router(), "2.0");
        assert!(!report.from_cache);
        assert_eq!(report.registered, 2);
        assert_eq!(discovery.source().scans(), 1);
        assert_eq!(discovery.store().get_string(VERSION_KEY).as_deref(), Some("2.0"));
    }

    #[test]
    fn test_empty_version_skips_cache() {
        let discovery = Discovery::new(source(), MemoryStore::new());

        discovery.auto_register_all(&router(), "");
        discovery.auto_register_all(&router(), "");
        assert_eq!(discovery.source().scans(), 2);
        assert!(discovery.store().is_empty());
    }

    #[test]
    fn test_clear_cache_forces_rescan() {
        let discovery = Discovery::new(source(), MemoryStore::new());
        discovery.auto_register_all(&router(), "1.0");
        discovery.auto_register_all(&router(), "1.0");
        assert_eq!(discovery.source().scans(), 1);

        discovery.clear_register_cache();
        assert!(discovery.store().is_empty());
        discovery.auto_register_all(&router(), "1.0");
        assert_eq!(discovery.source().scans(), 2);
    }
}
