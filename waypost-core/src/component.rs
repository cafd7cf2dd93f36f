//! # Components and Factories
//!
//! A [`ComponentFactory`] is what gets registered under a pattern. When a URL
//! resolves to that pattern the factory is invoked with the decoded query
//! [`Parameters`] and the caller's [`Context`], and produces a [`RouteResult`]:
//! either a [`Component`] to show together with its preferred
//! [`PresentationMode`], or a side-effecting action.
//!
//! The router never looks inside a component. It only hands it to the display
//! backend, which downcasts it to whatever concrete screen type it knows.

use crate::{
    error::BoxError,
    params::{Context, Parameters},
    pattern::{IntoPattern, Pattern},
    presentation::{PresentationMode, PresentationStyle},
};
use std::{any::Any, fmt, sync::Arc};

/// Object-safe access to [`Any`] for trait objects.
pub trait AsAny: Any + Send {
    /// Borrow as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Borrow as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Convert a box into `Box<dyn Any + Send>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T: Any + Send> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// A screen (or container of screens) the display backend can show.
pub trait Component: AsAny {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Apply a modal presentation style before being presented.
    fn set_presentation_style(&mut self, style: PresentationStyle) {
        let _ = style;
    }
}

/// A boxed, type-erased component.
pub type BoxComponent = Box<dyn Component>;

impl dyn Component {
    /// Borrow the component as `T`, if that is its type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Component as AsAny>::as_any(self).downcast_ref::<T>()
    }

    /// Mutably borrow the component as `T`, if that is its type.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Component as AsAny>::as_any_mut(self).downcast_mut::<T>()
    }

    /// Check whether the component is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.name()).finish()
    }
}

/// A zero-argument side effect produced instead of a screen.
pub type Action = Box<dyn FnOnce() + Send>;

/// What a factory produced for a URL. Exactly one variant per resolution.
pub enum RouteResult {
    /// A component and the way it prefers to be shown.
    Component {
        /// The component to show.
        component: BoxComponent,
        /// Preferred presentation, overridable by the caller.
        mode: PresentationMode,
    },
    /// A side effect; no navigation happens.
    Action(Action),
}

impl RouteResult {
    /// A component shown with an animated push.
    pub fn component<C: Component>(component: C) -> Self {
        RouteResult::Component {
            component: Box::new(component),
            mode: PresentationMode::default(),
        }
    }

    /// A component with an explicit preferred mode.
    pub fn component_with<C: Component>(component: C, mode: PresentationMode) -> Self {
        RouteResult::Component {
            component: Box::new(component),
            mode,
        }
    }

    /// A side effect.
    pub fn action<F: FnOnce() + Send + 'static>(action: F) -> Self {
        RouteResult::Action(Box::new(action))
    }

    /// Check if this is an action.
    pub fn is_action(&self) -> bool {
        matches!(self, RouteResult::Action(_))
    }
}

impl fmt::Debug for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteResult::Component { component, mode } => f
                .debug_struct("Component")
                .field("component", &component.name())
                .field("mode", mode)
                .finish(),
            RouteResult::Action(_) => f.write_str("Action(..)"),
        }
    }
}

/// Turns parameters and context into a [`RouteResult`].
///
/// Factories are stateless from the router's point of view and are shared
/// behind an `Arc`. Returning `Err` surfaces as
/// [`RouterError::Rejected`](crate::RouterError::Rejected).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `ComponentFactory`",
    label = "missing `ComponentFactory` implementation",
    note = "Implement `build`, or wrap a closure with `factory_fn`."
)]
pub trait ComponentFactory: Send + Sync + 'static {
    /// Build the result for one resolution.
    fn build(
        &self,
        params: Option<&Parameters>,
        ctx: Option<&Context>,
    ) -> Result<RouteResult, BoxError>;

    /// The pattern this factory declares for itself, if any.
    ///
    /// Used by membership queries; when `None` the registered pattern is used.
    fn declared_pattern(&self) -> Option<Pattern> {
        None
    }

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<T: ComponentFactory + ?Sized> ComponentFactory for Arc<T> {
    fn build(
        &self,
        params: Option<&Parameters>,
        ctx: Option<&Context>,
    ) -> Result<RouteResult, BoxError> {
        (**self).build(params, ctx)
    }

    fn declared_pattern(&self) -> Option<Pattern> {
        (**self).declared_pattern()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A factory built from a closure.
pub struct FnFactory<F> {
    name: String,
    pattern: Option<Pattern>,
    func: F,
}

impl<F> FnFactory<F>
where
    F: Fn(Option<&Parameters>, Option<&Context>) -> RouteResult + Send + Sync + 'static,
{
    /// Create a named factory from a closure.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            func,
        }
    }

    /// Declare the pattern this factory belongs to.
    pub fn with_pattern(mut self, pattern: impl IntoPattern) -> Self {
        self.pattern = Some(pattern.into_pattern());
        self
    }
}

impl<F> ComponentFactory for FnFactory<F>
where
    F: Fn(Option<&Parameters>, Option<&Context>) -> RouteResult + Send + Sync + 'static,
{
    fn build(
        &self,
        params: Option<&Parameters>,
        ctx: Option<&Context>,
    ) -> Result<RouteResult, BoxError> {
        Ok((self.func)(params, ctx))
    }

    fn declared_pattern(&self) -> Option<Pattern> {
        self.pattern.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A factory built from a fallible closure.
pub struct TryFnFactory<F> {
    name: String,
    func: F,
}

impl<F> TryFnFactory<F>
where
    F: Fn(Option<&Parameters>, Option<&Context>) -> Result<RouteResult, BoxError>
        + Send
        + Sync
        + 'static,
{
    /// Create a named factory from a fallible closure.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> ComponentFactory for TryFnFactory<F>
where
    F: Fn(Option<&Parameters>, Option<&Context>) -> Result<RouteResult, BoxError>
        + Send
        + Sync
        + 'static,
{
    fn build(
        &self,
        params: Option<&Parameters>,
        ctx: Option<&Context>,
    ) -> Result<RouteResult, BoxError> {
        (self.func)(params, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap a closure as a shareable factory.
pub fn factory_fn<F>(func: F) -> Arc<dyn ComponentFactory>
where
    F: Fn(Option<&Parameters>, Option<&Context>) -> RouteResult + Send + Sync + 'static,
{
    Arc::new(FnFactory::new("fn_factory", func))
}

/// A finite, enumerable set of `(pattern, factory)` cases for bulk
/// registration.
///
/// Typically implemented by a fieldless enum listing every screen of a
/// feature module.
pub trait RouteMap: Sized + 'static {
    /// Every case of the map.
    fn all_cases() -> Vec<Self>;

    /// The pattern of this case.
    fn pattern(&self) -> Pattern;

    /// The factory of this case.
    fn factory(&self) -> Arc<dyn ComponentFactory>;
}
