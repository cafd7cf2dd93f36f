//! Procedural macros for Waypost.
//!
//! - `#[routable("pattern")]` - submits a factory type to link-time discovery

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod routable;

/// Make a factory type discoverable under a pattern.
///
/// The annotated type must implement `ComponentFactory` and `Default`. The
/// attribute adds a `ROUTE_PATTERN` associated constant and submits a
/// `ComponentRegistration` keyed by the type's fully qualified name, so that
/// `Discovery::new(InventorySource, store)` finds it.
///
/// ```rust,ignore
/// #[waypost::routable("profile")]
/// #[derive(Default)]
/// struct ProfileFactory;
///
/// impl ComponentFactory for ProfileFactory { /* ... */ }
/// ```
///
/// `#[routable(pattern = "profile")]` is accepted as well.
#[proc_macro_attribute]
pub fn routable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as routable::RoutableArgs);
    let input = parse_macro_input!(item as DeriveInput);

    routable::expand(&args, &input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
