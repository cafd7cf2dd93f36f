//! The [`Router`]: registration, configuration and routing in one place.
//!
//! A router owns a [`PatternStore`], the two global hooks and a
//! [`Dispatcher`]. It is constructed once by the application's composition
//! root and shared as `Arc<Router>`; there is no process-wide instance.
//!
//! Every failure is reported to the error hook exactly once and then returned
//! to the caller.

use crate::{
    dispatcher::{Anchor, DEFAULT_RETRY_DELAY, Dispatcher, Outcome},
    resolver::{Resolution, Resolver},
    schedule::Scheduler,
    store::PatternStore,
};
use parking_lot::RwLock;
use std::{fmt, sync::Arc, time::Duration};
use tracing::debug;
use waypost_core::{
    Action, ComponentFactory, Context, Display, ErrorHook, FnFactory, InterruptHook, IntoPattern,
    Parameters, Pattern, PresentationMode, PresentationStyle, RouteMap, RouteResult, RouterError,
    Scheme, ScreenId, StackId, Wrapper,
};

/// Static router settings.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Scheme prepended to bare patterns and URLs.
    pub scheme: Option<Scheme>,
    /// Delay before a dispatch blocked by a dismissing screen is retried.
    pub retry_delay: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            scheme: None,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RouterConfig {
    /// Set the scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(Scheme::new(scheme));
        self
    }

    /// Set the retry delay.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

/// A single routing request with every knob exposed.
///
/// # Example
///
/// ```rust,ignore
/// let request = RouteRequest::new("profile?id=42")
///     .context(Context::new(session))
///     .mode(PresentationMode::present())
///     .from_screen(ScreenId(3));
/// router.route_request(request)?;
/// ```
pub struct RouteRequest {
    url: String,
    ctx: Option<Context>,
    mode: Option<PresentationMode>,
    anchor: Anchor,
    completion: Option<Action>,
}

impl RouteRequest {
    /// A request for `url` with no context, the factory's preferred mode and
    /// the active screen as anchor.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ctx: None,
            mode: None,
            anchor: Anchor::Active,
            completion: None,
        }
    }

    /// Attach a caller context.
    pub fn context(mut self, ctx: Context) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Override the factory's preferred presentation mode.
    pub fn mode(mut self, mode: PresentationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Push onto `stack` instead of the active screen's back-stack.
    pub fn from_stack(mut self, stack: StackId) -> Self {
        self.anchor = Anchor::Stack(stack);
        self
    }

    /// Dispatch from `screen` instead of the active screen.
    pub fn from_screen(mut self, screen: ScreenId) -> Self {
        self.anchor = Anchor::Screen(screen);
        self
    }

    /// Run `completion` once the routed component has been presented.
    ///
    /// Dropped when the route pushes or runs an action.
    pub fn on_presented(mut self, completion: impl FnOnce() + Send + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    /// The requested URL, as given.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for RouteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRequest")
            .field("url", &self.url)
            .field("ctx", &self.ctx)
            .field("mode", &self.mode)
            .field("anchor", &self.anchor)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

/// Builder for [`Router`].
pub struct RouterBuilder {
    display: Arc<dyn Display>,
    config: RouterConfig,
    error_hook: Option<Arc<dyn ErrorHook>>,
    interrupt_hook: Option<Arc<dyn InterruptHook>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl RouterBuilder {
    /// Start building a router over `display`.
    pub fn new(display: Arc<dyn Display>) -> Self {
        Self {
            display,
            config: RouterConfig::default(),
            error_hook: None,
            interrupt_hook: None,
            scheduler: None,
        }
    }

    /// Apply a whole [`RouterConfig`].
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the scheme (`"myapp"` becomes `"myapp://"`).
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.scheme = Some(Scheme::new(scheme));
        self
    }

    /// Set the global error hook.
    pub fn error_handler(mut self, hook: impl ErrorHook + 'static) -> Self {
        self.error_hook = Some(Arc::new(hook));
        self
    }

    /// Set the global interrupt hook.
    pub fn interrupt_handler(mut self, hook: impl InterruptHook + 'static) -> Self {
        self.interrupt_hook = Some(Arc::new(hook));
        self
    }

    /// Defer dispatches blocked by a dismissing screen through `scheduler`.
    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Some(Arc::new(scheduler));
        self
    }

    /// Set the retry delay.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Build the router.
    pub fn build(self) -> Router {
        let store = match self.config.scheme {
            Some(scheme) => PatternStore::with_scheme(scheme),
            None => PatternStore::new(),
        };
        let dispatcher = Dispatcher::new(self.display)
            .with_scheduler(self.scheduler)
            .with_retry_delay(self.config.retry_delay);
        Router {
            store,
            error_hook: RwLock::new(self.error_hook),
            interrupt_hook: RwLock::new(self.interrupt_hook),
            dispatcher,
        }
    }
}

/// URL router over a [`Display`] backend.
///
/// # Example
///
/// ```rust,ignore
/// let router = Router::builder(display)
///     .scheme("myapp")
///     .error_handler(TracingErrorHook)
///     .build();
///
/// router.register_fn("profile", |params, _ctx| {
///     let id = params.and_then(|p| p.get("id")).unwrap_or_default();
///     RouteResult::component(ProfileScreen::new(id))
/// });
///
/// router.push("profile?id=42", None, None, true)?;
/// ```
pub struct Router {
    store: PatternStore,
    error_hook: RwLock<Option<Arc<dyn ErrorHook>>>,
    interrupt_hook: RwLock<Option<Arc<dyn InterruptHook>>>,
    dispatcher: Dispatcher,
}

impl Router {
    /// A router over `display` with the default configuration.
    pub fn new(display: Arc<dyn Display>) -> Self {
        RouterBuilder::new(display).build()
    }

    /// Start building a router over `display`.
    pub fn builder(display: Arc<dyn Display>) -> RouterBuilder {
        RouterBuilder::new(display)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Set the scheme. Patterns registered before keep their keys.
    pub fn configure(&self, scheme: impl Into<String>) {
        let scheme = Scheme::new(scheme);
        debug!(%scheme, "configured scheme");
        self.store.set_scheme(Some(scheme));
    }

    /// The configured scheme.
    pub fn scheme(&self) -> Option<Scheme> {
        self.store.scheme()
    }

    /// Replace the global error hook.
    pub fn configure_global_error_handler(&self, hook: impl ErrorHook + 'static) {
        *self.error_hook.write() = Some(Arc::new(hook));
    }

    /// Replace the global interrupt hook.
    pub fn configure_global_interrupt_handler(&self, hook: impl InterruptHook + 'static) {
        *self.interrupt_hook.write() = Some(Arc::new(hook));
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register `factory` under `pattern`. The newest registration wins.
    pub fn register<F: ComponentFactory>(&self, pattern: impl IntoPattern, factory: F) {
        self.store.register(pattern, Arc::new(factory));
    }

    /// Register an already shared factory under `pattern`.
    pub fn register_shared(&self, pattern: impl IntoPattern, factory: Arc<dyn ComponentFactory>) {
        self.store.register(pattern, factory);
    }

    /// Register a closure under `pattern`.
    pub fn register_fn<F>(&self, pattern: impl IntoPattern, func: F)
    where
        F: Fn(Option<&Parameters>, Option<&Context>) -> RouteResult + Send + Sync + 'static,
    {
        let pattern = pattern.into_pattern();
        let factory = FnFactory::new(pattern.as_str(), func).with_pattern(pattern.clone());
        self.store.register(pattern, Arc::new(factory));
    }

    /// Register every case of `M`.
    pub fn register_map<M: RouteMap>(&self) {
        for case in M::all_cases() {
            self.store.register(case.pattern(), case.factory());
        }
    }

    /// Register every `(pattern, factory)` pair.
    pub fn register_all<P, I>(&self, entries: I)
    where
        P: IntoPattern,
        I: IntoIterator<Item = (P, Arc<dyn ComponentFactory>)>,
    {
        for (pattern, factory) in entries {
            self.store.register(pattern, factory);
        }
    }

    /// Check whether a factory declares `pattern`.
    pub fn contains(&self, pattern: impl IntoPattern) -> bool {
        self.store.contains(pattern)
    }

    /// Registered patterns, sorted.
    pub fn patterns(&self) -> Vec<Pattern> {
        self.store.patterns()
    }

    /// The underlying store.
    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    /// Remove every registration.
    pub fn clear(&self) {
        self.store.clear();
    }

    // ------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------

    /// Resolve `url` without dispatching it.
    ///
    /// Failures are still reported to the error hook.
    pub fn resolve(&self, url: &str, ctx: Option<&Context>) -> Result<Resolution, RouterError> {
        let interrupt = self.interrupt_hook.read().clone();
        Resolver::new(&self.store)
            .with_interrupt(interrupt.as_deref())
            .resolve(url, ctx)
            .map_err(|error| self.report(error))
    }

    /// Resolve `url` and dispatch it from the active screen.
    ///
    /// `mode` overrides the factory's preferred presentation mode.
    pub fn route(
        &self,
        url: &str,
        ctx: Option<&Context>,
        mode: Option<PresentationMode>,
    ) -> Result<Outcome, RouterError> {
        self.route_anchored(url, ctx, mode, Anchor::Active, None)
    }

    /// Resolve `url` and push it onto `from` (or the active screen's
    /// back-stack).
    pub fn push(
        &self,
        url: &str,
        ctx: Option<&Context>,
        from: Option<StackId>,
        animated: bool,
    ) -> Result<Outcome, RouterError> {
        let anchor = from.map_or(Anchor::Active, Anchor::Stack);
        let mode = PresentationMode::Push { animated };
        self.route_anchored(url, ctx, Some(mode), anchor, None)
    }

    /// Resolve `url` and present it from `from` (or the active screen),
    /// optionally embedded by `wrapper`.
    ///
    /// `completion` runs once the component is on screen. It is dropped when
    /// the route turns out to be an action.
    pub fn present(
        &self,
        url: &str,
        ctx: Option<&Context>,
        wrapper: Option<Wrapper>,
        from: Option<ScreenId>,
        animated: bool,
        completion: Option<Action>,
    ) -> Result<Outcome, RouterError> {
        let anchor = from.map_or(Anchor::Active, Anchor::Screen);
        let mode = PresentationMode::Present {
            wrapper,
            style: PresentationStyle::Automatic,
            animated,
        };
        self.route_anchored(url, ctx, Some(mode), anchor, completion)
    }

    /// Route a fully specified [`RouteRequest`].
    pub fn route_request(&self, request: RouteRequest) -> Result<Outcome, RouterError> {
        let RouteRequest {
            url,
            ctx,
            mode,
            anchor,
            completion,
        } = request;
        self.route_anchored(&url, ctx.as_ref(), mode, anchor, completion)
    }

    fn route_anchored(
        &self,
        url: &str,
        ctx: Option<&Context>,
        mode: Option<PresentationMode>,
        anchor: Anchor,
        completion: Option<Action>,
    ) -> Result<Outcome, RouterError> {
        let resolution = self.resolve(url, ctx)?;
        self.dispatcher
            .dispatch(&resolution.url, resolution.result, mode, anchor, completion)
            .map_err(|error| self.report(error))
    }

    fn report(&self, error: RouterError) -> RouterError {
        debug!(url = error.url(), kind = ?error.kind(), "routing failed");
        let hook = self.error_hook.read().clone();
        if let Some(hook) = hook {
            hook.on_error(&error);
        }
        error
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("store", &self.store)
            .field("error_hook", &self.error_hook.read().is_some())
            .field("interrupt_hook", &self.interrupt_hook.read().is_some())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
