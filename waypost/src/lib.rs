//! # waypost - URL Navigation Router
//!
//! `waypost` maps URL-style strings such as `myapp://profile?id=42` to screen
//! factories and performs the resulting navigation (push onto a back-stack or
//! modal present) through a [`Display`] backend supplied by the host.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypost::prelude::*;
//!
//! let router = Router::builder(display)
//!     .scheme("myapp")
//!     .error_handler(TracingErrorHook)
//!     .build();
//!
//! router.register_fn("profile", |params, _ctx| {
//!     let id = params.and_then(|p| p.get("id")).unwrap_or_default();
//!     RouteResult::component(ProfileScreen::new(id))
//! });
//!
//! router.push("profile?id=42", None, None, true)?;
//! ```
//!
//! ## Discovery
//!
//! With the `macros` and `inventory` features (both default), factory types
//! annotated with [`routable`] are collected at link time and registered in
//! bulk:
//!
//! ```rust,ignore
//! #[waypost::routable("settings")]
//! #[derive(Default)]
//! struct SettingsFactory;
//!
//! let discovery = Discovery::new(InventorySource, MemoryStore::new());
//! discovery.auto_register_all(&router, env!("CARGO_PKG_VERSION"));
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use waypost_core::{
    // Components and factories
    Action,
    AsAny,
    BoxComponent,
    // Errors
    BoxError,
    Component,
    ComponentFactory,
    // Parameters
    Context,
    // Display backend
    Display,
    ErrorHook,
    ErrorKind,
    FnFactory,
    // Hooks
    InterruptHook,
    InterruptRequest,
    // Patterns
    IntoPattern,
    Parameters,
    Pattern,
    // Presentation
    PresentationMode,
    PresentationStyle,
    RouteMap,
    RouteResult,
    RouterError,
    Scheme,
    ScreenId,
    StackId,
    TryFnFactory,
    Wrapper,
    factory_fn,
};

pub use waypost_std::{
    RouteRequest, Router, RouterBuilder, RouterConfig,
    dispatcher::{Anchor, DEFAULT_RETRY_DELAY, Outcome},
    resolver::Resolution,
    store::PatternStore,
    tree::{NavigationContainer, ScreenTree},
    url,
};

/// Bulk registration of discovered components.
pub mod discovery {
    pub use waypost_std::discovery::{
        ComponentSource, DiscoveredComponent, Discovery, DiscoveryReport, MemoryStore,
        PersistentStore, StaticSource, TYPES_KEY, VERSION_KEY,
    };

    #[cfg(feature = "inventory")]
    pub use waypost_std::discovery::{ComponentRegistration, InventorySource};
}

/// Standard hook implementations.
pub mod hooks {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::hooks::*;
}

/// Deferred execution for the dismissal retry.
pub mod schedule {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::schedule::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::testing::*;
}

/// Prelude module - common imports for Waypost.
///
/// # Usage
///
/// ```rust,ignore
/// use waypost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core traits
        Component,
        ComponentFactory,
        Context,
        Display,
        ErrorHook,
        InterruptHook,
        InterruptRequest,
        Parameters,
        PresentationMode,
        PresentationStyle,
        RouteMap,
        RouteResult,
        // Routing
        Router,
        RouterError,
        ScreenId,
        StackId,
        Wrapper,
        hooks::TracingErrorHook,
    };
}

#[cfg(feature = "macros")]
pub use waypost_macros::routable;

#[cfg(feature = "inventory")]
pub use inventory;
