//! Resolution: URL → [`RouteResult`].
//!
//! One pass, no retries:
//!
//! 1. normalize the scheme
//! 2. split into pattern and query, decode the query
//! 3. look the pattern up (miss ⇒ [`RouterError::NoMatchPattern`])
//! 4. ask the interrupt hook (veto ⇒ [`RouterError::Interrupt`]; the factory
//!    is never invoked)
//! 5. invoke the factory (error ⇒ [`RouterError::Rejected`])
//!
//! The resolver does not report to the error hook; its caller does, once.

use crate::{store::PatternStore, url};
use tracing::{debug, trace};
use waypost_core::{
    Context, InterruptHook, InterruptRequest, Parameters, Pattern, RouteResult, RouterError,
};

/// A successful resolution.
#[derive(Debug)]
pub struct Resolution {
    /// The scheme-normalized URL.
    pub url: String,
    /// The matched pattern.
    pub pattern: Pattern,
    /// Decoded query, if the URL had one.
    pub params: Option<Parameters>,
    /// What the factory produced.
    pub result: RouteResult,
}

/// Resolves URLs against a [`PatternStore`].
pub struct Resolver<'a> {
    store: &'a PatternStore,
    interrupt: Option<&'a dyn InterruptHook>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver without an interrupt hook.
    pub fn new(store: &'a PatternStore) -> Self {
        Self {
            store,
            interrupt: None,
        }
    }

    /// Consult `hook` before invoking factories.
    pub fn with_interrupt(mut self, hook: Option<&'a dyn InterruptHook>) -> Self {
        self.interrupt = hook;
        self
    }

    /// Resolve `url` into a [`Resolution`].
    pub fn resolve(&self, url: &str, ctx: Option<&Context>) -> Result<Resolution, RouterError> {
        let scheme = self.store.scheme();
        let parsed = url::parse(url, scheme.as_ref());
        trace!(url = %parsed.url, pattern = %parsed.pattern, "parsed url");

        let Some(factory) = self.store.lookup(parsed.pattern.as_str()) else {
            return Err(RouterError::NoMatchPattern { url: parsed.url });
        };

        if let Some(hook) = self.interrupt {
            let request = InterruptRequest {
                url: &parsed.url,
                pattern: &parsed.pattern,
                params: parsed.params.as_ref(),
                ctx,
            };
            if hook.should_interrupt(&request) {
                debug!(url = %parsed.url, hook = hook.name(), "route interrupted");
                return Err(RouterError::Interrupt { url: parsed.url });
            }
        }

        match factory.build(parsed.params.as_ref(), ctx) {
            Ok(result) => {
                debug!(url = %parsed.url, factory = factory.name(), ?result, "route resolved");
                Ok(Resolution {
                    url: parsed.url,
                    pattern: parsed.pattern,
                    params: parsed.params,
                    result,
                })
            }
            Err(source) => Err(RouterError::Rejected {
                url: parsed.url,
                source,
            }),
        }
    }
}
