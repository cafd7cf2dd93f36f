//! # Display Backend
//!
//! The router never draws anything. It talks to the platform navigation host
//! through [`Display`], which answers "what screen is active right now",
//! pushes onto back-stacks and presents modally.
//!
//! Screens and back-stacks are referred to by opaque handles the backend
//! hands out; the router only passes them back.

use crate::component::{Action, BoxComponent};

/// Opaque handle to a screen owned by the display backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u64);

/// Opaque handle to a back-stack (navigation container).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackId(pub u64);

/// The presentation capability the router dispatches into.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a display backend",
    label = "missing `Display` implementation",
    note = "Implement `Display` for the type wrapping your navigation host."
)]
pub trait Display: Send + Sync {
    /// The currently active (top-most visible) screen, if any.
    fn active_screen(&self) -> Option<ScreenId>;

    /// The back-stack containing `screen`, if it is inside one.
    fn back_stack(&self, screen: ScreenId) -> Option<StackId>;

    /// Push `component` onto `stack`.
    fn push(&self, stack: StackId, component: BoxComponent, animated: bool);

    /// Present `component` modally from `from`.
    ///
    /// `completion`, when given, runs once the component is on screen. A
    /// backend that drops the presentation drops the completion with it.
    fn present(
        &self,
        from: ScreenId,
        component: BoxComponent,
        animated: bool,
        completion: Option<Action>,
    );

    /// Whether `screen` is being dismissed right now.
    fn is_dismissing(&self, screen: ScreenId) -> bool {
        let _ = screen;
        false
    }

    /// Whether `stack` is being dismissed right now.
    fn is_stack_dismissing(&self, stack: StackId) -> bool {
        let _ = stack;
        false
    }
}

impl<T: Display + ?Sized> Display for std::sync::Arc<T> {
    fn active_screen(&self) -> Option<ScreenId> {
        (**self).active_screen()
    }

    fn back_stack(&self, screen: ScreenId) -> Option<StackId> {
        (**self).back_stack(screen)
    }

    fn push(&self, stack: StackId, component: BoxComponent, animated: bool) {
        (**self).push(stack, component, animated)
    }

    fn present(
        &self,
        from: ScreenId,
        component: BoxComponent,
        animated: bool,
        completion: Option<Action>,
    ) {
        (**self).present(from, component, animated, completion)
    }

    fn is_dismissing(&self, screen: ScreenId) -> bool {
        (**self).is_dismissing(screen)
    }

    fn is_stack_dismissing(&self, stack: StackId) -> bool {
        (**self).is_stack_dismissing(stack)
    }
}
