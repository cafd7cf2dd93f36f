//! # Global Hooks
//!
//! Two process-wide extension points surround every resolution:
//!
//! - [`InterruptHook`] runs after the pattern matched and before the factory
//!   is invoked. Returning `true` vetoes the request (auth gates, feature
//!   flags, A/B redirects handled elsewhere).
//! - [`ErrorHook`] observes every failure once before it is returned to the
//!   caller. It is a notification channel; it cannot recover the error.
//!
//! Plain closures implement both traits.

use crate::{
    error::RouterError,
    params::{Context, Parameters},
    pattern::Pattern,
};

/// What the interrupt hook gets to look at.
#[derive(Debug)]
pub struct InterruptRequest<'a> {
    /// The scheme-normalized URL.
    pub url: &'a str,

    /// The matched pattern.
    pub pattern: &'a Pattern,

    /// Decoded query parameters, if the URL had a query.
    pub params: Option<&'a Parameters>,

    /// The caller's context, if any.
    pub ctx: Option<&'a Context>,
}

/// Veto predicate run before a factory is invoked.
pub trait InterruptHook: Send + Sync {
    /// Return `true` to cancel the request.
    fn should_interrupt(&self, request: &InterruptRequest<'_>) -> bool;

    /// Name used in logs.
    fn name(&self) -> &str {
        "unnamed_interrupt_hook"
    }
}

impl<F> InterruptHook for F
where
    F: Fn(&InterruptRequest<'_>) -> bool + Send + Sync,
{
    fn should_interrupt(&self, request: &InterruptRequest<'_>) -> bool {
        (self)(request)
    }
}

/// Observer notified once of every routing failure.
pub trait ErrorHook: Send + Sync {
    /// Called before the error is returned to the caller.
    fn on_error(&self, error: &RouterError);
}

impl<F> ErrorHook for F
where
    F: Fn(&RouterError) + Send + Sync,
{
    fn on_error(&self, error: &RouterError) {
        (self)(error)
    }
}
