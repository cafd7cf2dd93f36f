//! Link-time component collection via `inventory`.
//!
//! Registrations are usually submitted by the `#[routable]` attribute, but
//! can be written by hand:
//!
//! ```rust,ignore
//! fn make_profile() -> Arc<dyn ComponentFactory> {
//!     Arc::new(ProfileFactory)
//! }
//!
//! inventory::submit! {
//!     ComponentRegistration::new("app::ProfileFactory", "profile", make_profile)
//! }
//! ```

use super::{ComponentSource, DiscoveredComponent};
use std::sync::Arc;
use waypost_core::{ComponentFactory, Pattern};

/// A component submitted to the link-time registry.
#[derive(Debug)]
pub struct ComponentRegistration {
    type_name: &'static str,
    pattern: &'static str,
    make: fn() -> Arc<dyn ComponentFactory>,
}

impl ComponentRegistration {
    /// Describe a component: its fully qualified type name, its pattern and a
    /// constructor for its factory.
    pub const fn new(
        type_name: &'static str,
        pattern: &'static str,
        make: fn() -> Arc<dyn ComponentFactory>,
    ) -> Self {
        Self {
            type_name,
            pattern,
            make,
        }
    }

    /// The fully qualified type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The declared pattern.
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    fn discover(&self) -> DiscoveredComponent {
        DiscoveredComponent {
            type_name: self.type_name.to_string(),
            pattern: Pattern::new(self.pattern),
            factory: (self.make)(),
        }
    }
}

inventory::collect!(ComponentRegistration);

/// Every [`ComponentRegistration`] linked into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventorySource;

impl ComponentSource for InventorySource {
    fn components(&self) -> Vec<DiscoveredComponent> {
        let mut registrations: Vec<&ComponentRegistration> =
            inventory::iter::<ComponentRegistration>.into_iter().collect();
        registrations.sort_by_key(|registration| registration.type_name);
        registrations
            .into_iter()
            .map(ComponentRegistration::discover)
            .collect()
    }

    fn find(&self, type_name: &str) -> Option<DiscoveredComponent> {
        inventory::iter::<ComponentRegistration>
            .into_iter()
            .find(|registration| registration.type_name == type_name)
            .map(ComponentRegistration::discover)
    }
}
