//! `#[routable]` expansion.

use quote::{format_ident, quote};
use syn::{
    DeriveInput, Ident, LitStr, Token,
    parse::{Parse, ParseStream},
};

/// Arguments for `#[routable]`.
pub(crate) struct RoutableArgs {
    /// The pattern the type is discovered under.
    pub pattern: LitStr,
}

impl Parse for RoutableArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Err(input.error("expected a pattern: #[routable(\"profile\")]"));
        }

        // Bare literal form
        if input.peek(LitStr) {
            let pattern = input.parse()?;
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
            if !input.is_empty() {
                return Err(input.error("unexpected tokens after pattern"));
            }
            return Ok(RoutableArgs { pattern });
        }

        let mut pattern = None;
        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "pattern" => pattern = Some(input.parse::<LitStr>()?),
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        match pattern {
            Some(pattern) => Ok(RoutableArgs { pattern }),
            None => Err(input.error("missing `pattern = \"...\"`")),
        }
    }
}

pub(crate) fn expand(
    args: &RoutableArgs,
    input: &DeriveInput,
) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[routable] types cannot be generic",
        ));
    }

    let pattern = &args.pattern;
    if pattern.value().is_empty() {
        return Err(syn::Error::new_spanned(pattern, "pattern must not be empty"));
    }

    let name = &input.ident;
    let make_fn = format_ident!("__waypost_make_{}", name);

    Ok(quote! {
        #input

        impl #name {
            /// The pattern this type is discovered under.
            pub const ROUTE_PATTERN: &'static str = #pattern;
        }

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #make_fn() -> ::std::sync::Arc<dyn ::waypost::ComponentFactory> {
            ::std::sync::Arc::new(<#name as ::core::default::Default>::default())
        }

        ::waypost::inventory::submit! {
            ::waypost::discovery::ComponentRegistration::new(
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#name)),
                #pattern,
                #make_fn,
            )
        }
    })
}
