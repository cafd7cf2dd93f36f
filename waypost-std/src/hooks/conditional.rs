//! Composable interrupt hooks.

use std::{fmt, sync::Arc};
use waypost_core::{InterruptHook, InterruptRequest, IntoPattern, Pattern};

const SCHEME_SEPARATOR: &str = "://";

/// Vetoes when any member vetoes.
///
/// Members are asked in insertion order; the first veto stops the chain.
#[derive(Clone, Default)]
pub struct InterruptChain {
    hooks: Vec<Arc<dyn InterruptHook>>,
}

impl InterruptChain {
    /// Create an empty chain. An empty chain never vetoes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member.
    pub fn with(mut self, hook: impl InterruptHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if there are no members.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl InterruptHook for InterruptChain {
    fn should_interrupt(&self, request: &InterruptRequest<'_>) -> bool {
        self.hooks.iter().any(|hook| {
            let veto = hook.should_interrupt(request);
            if veto {
                tracing::debug!(url = request.url, hook = hook.name(), "chain member vetoed");
            }
            veto
        })
    }

    fn name(&self) -> &str {
        "interrupt_chain"
    }
}

impl fmt::Debug for InterruptChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.hooks.iter().map(|h| h.name()).collect();
        f.debug_struct("InterruptChain").field("hooks", &names).finish()
    }
}

type Predicate = Box<dyn Fn(&InterruptRequest<'_>) -> bool + Send + Sync>;

/// Vetoes requests for a set of patterns while a predicate holds.
///
/// Guarded patterns may be given with or without the scheme; `"admin"`
/// guards `myapp://admin` whatever the scheme.
///
/// # Example
///
/// ```rust,ignore
/// let signed_out = session.clone();
/// let guard = PatternGuard::new("auth", move |_| !signed_out.is_signed_in())
///     .guarding("profile")
///     .guarding("orders");
/// router.configure_global_interrupt_handler(guard);
/// ```
pub struct PatternGuard {
    name: String,
    patterns: Vec<Pattern>,
    predicate: Predicate,
}

impl PatternGuard {
    /// Create a guard that vetoes when `predicate` returns `true`.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&InterruptRequest<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            patterns: Vec::new(),
            predicate: Box::new(predicate),
        }
    }

    /// Add a guarded pattern.
    pub fn guarding(mut self, pattern: impl IntoPattern) -> Self {
        self.patterns.push(pattern.into_pattern());
        self
    }

    /// Check whether `pattern` is guarded.
    pub fn guards(&self, pattern: &Pattern) -> bool {
        self.patterns
            .iter()
            .any(|guarded| guarded == pattern || strip_scheme(guarded) == strip_scheme(pattern))
    }
}

fn strip_scheme(pattern: &Pattern) -> &str {
    let raw = pattern.as_str();
    raw.split_once(SCHEME_SEPARATOR)
        .map_or(raw, |(_, rest)| rest)
}

impl InterruptHook for PatternGuard {
    fn should_interrupt(&self, request: &InterruptRequest<'_>) -> bool {
        self.guards(request.pattern) && (self.predicate)(request)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for PatternGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternGuard")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(pattern: &Pattern) -> InterruptRequest<'_> {
        InterruptRequest {
            url: pattern.as_str(),
            pattern,
            params: None,
            ctx: None,
        }
    }

    #[test]
    fn test_chain_short_circuits() {
        let asked = Arc::new(AtomicUsize::new(0));
        let counter = asked.clone();
        let chain = InterruptChain::new()
            .with(|_: &InterruptRequest<'_>| true)
            .with(move |_: &InterruptRequest<'_>| {
                counter.fetch_add(1, Ordering::SeqCst);
                false
            });

        let pattern = Pattern::new("myapp://home");
        assert!(chain.should_interrupt(&request(&pattern)));
        assert_eq!(asked.load(Ordering::SeqCst), 0);
        assert!(!InterruptChain::new().should_interrupt(&request(&pattern)));
    }

    #[test]
    fn test_pattern_guard() {
        let guard = PatternGuard::new("auth", |_| true)
            .guarding("admin")
            .guarding("myapp://orders");

        assert!(guard.should_interrupt(&request(&Pattern::new("myapp://admin"))));
        assert!(guard.should_interrupt(&request(&Pattern::new("myapp://orders"))));
        assert!(!guard.should_interrupt(&request(&Pattern::new("myapp://home"))));
        assert_eq!(guard.name(), "auth");
    }

    #[test]
    fn test_pattern_guard_predicate() {
        let guard = PatternGuard::new("needs_id", |req| {
            req.params.is_none_or(|p| !p.contains_key("id"))
        })
        .guarding("profile");

        let pattern = Pattern::new("myapp://profile");
        assert!(guard.should_interrupt(&request(&pattern)));

        let params = waypost_core::Parameters::new().with("id", "1");
        let with_id = InterruptRequest {
            params: Some(&params),
            ..request(&pattern)
        };
        assert!(!guard.should_interrupt(&with_id));
    }
}
