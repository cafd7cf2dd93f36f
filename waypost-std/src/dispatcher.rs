//! Dispatch: [`RouteResult`] → display backend.
//!
//! Actions run in place. Components are pushed or presented according to the
//! caller's override or, failing that, their own preferred mode. A present
//! completion is handed to the display; pushes and actions drop it.
//!
//! # Transition guard
//!
//! When the anchor screen (or its back-stack) is being dismissed, a push or
//! present would land on a screen that is about to disappear. If a
//! [`Scheduler`] is configured the dispatch is deferred once by the retry
//! delay and performed against whatever screen is active then. The retried
//! outcome is only logged: errors from it never reach the error hook.

use crate::schedule::Scheduler;
use std::{fmt, sync::Arc, time::Duration};
use tracing::debug;
use waypost_core::{
    Action, BoxComponent, Display, PresentationMode, RouteResult, RouterError, ScreenId, StackId,
};

/// Default delay before a guarded dispatch is retried.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Where a dispatch is performed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// The display's currently active screen.
    #[default]
    Active,
    /// A specific back-stack (push) or the active screen (present).
    Stack(StackId),
    /// A specific screen: its back-stack for push, itself for present.
    Screen(ScreenId),
}

/// What a successful dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The component was pushed onto `stack`.
    Pushed {
        /// The back-stack pushed onto.
        stack: StackId,
    },
    /// The component was presented from `from`.
    Presented {
        /// The presenting screen.
        from: ScreenId,
    },
    /// An action ran; no navigation happened.
    Performed,
    /// The anchor was mid-dismissal; the dispatch was scheduled for later.
    Deferred,
}

/// Performs resolved routes against a [`Display`].
pub struct Dispatcher {
    display: Arc<dyn Display>,
    scheduler: Option<Arc<dyn Scheduler>>,
    retry_delay: Duration,
}

impl Dispatcher {
    /// Create a dispatcher without deferral.
    pub fn new(display: Arc<dyn Display>) -> Self {
        Self {
            display,
            scheduler: None,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Defer guarded dispatches through `scheduler`.
    pub fn with_scheduler(mut self, scheduler: Option<Arc<dyn Scheduler>>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Delay before a guarded dispatch is retried.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// The display backend.
    pub fn display(&self) -> &Arc<dyn Display> {
        &self.display
    }

    /// Dispatch `result`, resolved from `url`.
    ///
    /// `completion` runs once a presented component is on screen, including
    /// after a deferred retry.
    pub fn dispatch(
        &self,
        url: &str,
        result: RouteResult,
        mode_override: Option<PresentationMode>,
        anchor: Anchor,
        completion: Option<Action>,
    ) -> Result<Outcome, RouterError> {
        let (component, mode) = match result {
            RouteResult::Action(action) => {
                debug!(url, "performing action");
                action();
                return Ok(Outcome::Performed);
            }
            RouteResult::Component { component, mode } => {
                (component, mode_override.unwrap_or(mode))
            }
        };

        if let Some(scheduler) = &self.scheduler {
            if self.anchor_is_dismissing(anchor) {
                debug!(url, delay = ?self.retry_delay, "anchor is dismissing; deferring dispatch");
                let display = Arc::clone(&self.display);
                let url = url.to_string();
                scheduler.schedule_after(
                    self.retry_delay,
                    Box::new(move || {
                        let outcome =
                            perform(&*display, &url, component, mode, Anchor::Active, completion);
                        match outcome {
                            Ok(outcome) => {
                                debug!(url = %url, ?outcome, "deferred dispatch finished")
                            }
                            Err(error) => {
                                debug!(url = %url, %error, "deferred dispatch failed; discarding")
                            }
                        }
                    }),
                );
                return Ok(Outcome::Deferred);
            }
        }

        perform(&*self.display, url, component, mode, anchor, completion)
    }

    fn anchor_is_dismissing(&self, anchor: Anchor) -> bool {
        let display = &*self.display;
        let screen_dismissing = |screen: ScreenId| {
            display.is_dismissing(screen)
                || display
                    .back_stack(screen)
                    .is_some_and(|stack| display.is_stack_dismissing(stack))
        };
        match anchor {
            Anchor::Active => display.active_screen().is_some_and(screen_dismissing),
            Anchor::Screen(screen) => screen_dismissing(screen),
            Anchor::Stack(stack) => display.is_stack_dismissing(stack),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("deferral", &self.scheduler.is_some())
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

fn perform(
    display: &dyn Display,
    url: &str,
    component: BoxComponent,
    mode: PresentationMode,
    anchor: Anchor,
    completion: Option<Action>,
) -> Result<Outcome, RouterError> {
    match mode {
        PresentationMode::Push { animated } => {
            let stack = match anchor {
                Anchor::Stack(stack) => Some(stack),
                Anchor::Screen(screen) => display.back_stack(screen),
                Anchor::Active => display
                    .active_screen()
                    .and_then(|screen| display.back_stack(screen)),
            };
            let Some(stack) = stack else {
                return Err(RouterError::NoPushBase {
                    url: url.to_string(),
                });
            };
            debug!(url, component = component.name(), ?stack, animated, "pushing");
            display.push(stack, component, animated);
            Ok(Outcome::Pushed { stack })
        }
        PresentationMode::Present {
            wrapper,
            style,
            animated,
        } => {
            let from = match anchor {
                Anchor::Screen(screen) => Some(screen),
                Anchor::Active | Anchor::Stack(_) => display.active_screen(),
            };
            let Some(from) = from else {
                return Err(RouterError::NoPresentBase {
                    url: url.to_string(),
                });
            };
            let mut component = match wrapper {
                Some(wrapper) => wrapper.wrap(component),
                None => component,
            };
            component.set_presentation_style(style);
            debug!(url, component = component.name(), ?from, ?style, animated, "presenting");
            display.present(from, component, animated, completion);
            Ok(Outcome::Presented { from })
        }
    }
}
