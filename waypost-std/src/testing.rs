//! Testing utilities for Waypost.
//!
//! This module provides doubles for the router's collaborators so routing
//! behavior can be asserted without a real navigation host.
//!
//! # Features
//!
//! - [`TestScreen`]: A component that records its presentation style
//! - [`CountingFactory`]: A factory that counts invocations and records params
//! - [`RecordingErrorHook`]: An error hook that records every error it sees
//! - [`RecordingDisplay`]: A scriptable display backend that records transitions
//! - [`ManualScheduler`]: A scheduler that runs deferred tasks on demand

use crate::schedule::{Scheduler, Task};
use parking_lot::Mutex;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use waypost_core::{
    Action, BoxComponent, BoxError, Component, ComponentFactory, Context, Display, ErrorHook,
    ErrorKind, Parameters, PresentationMode, PresentationStyle, RouteResult, RouterError, ScreenId,
    StackId,
};

// ============================================================================
// Test Screen
// ============================================================================

/// A component carrying a name, the style it was given and optional content
/// (when acting as a container).
#[derive(Debug)]
pub struct TestScreen {
    /// Name reported by [`Component::name`].
    pub name: String,
    /// Last style applied.
    pub style: PresentationStyle,
    /// Embedded component, for containers.
    pub content: Option<BoxComponent>,
}

impl TestScreen {
    /// A plain screen.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: PresentationStyle::Automatic,
            content: None,
        }
    }

    /// A container embedding `content`.
    pub fn container(name: impl Into<String>, content: BoxComponent) -> Self {
        Self {
            content: Some(content),
            ..Self::new(name)
        }
    }
}

impl Component for TestScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_presentation_style(&mut self, style: PresentationStyle) {
        self.style = style;
    }
}

// ============================================================================
// Counting Factory
// ============================================================================

/// A factory that builds [`TestScreen`]s and counts how often it was invoked.
///
/// Clones share their counters.
///
/// # Example
///
/// ```rust,ignore
/// let factory = CountingFactory::new("Profile");
/// router.register("profile", factory.clone());
///
/// router.route("profile?id=1", None, None)?;
/// assert_eq!(factory.count(), 1);
/// ```
#[derive(Clone)]
pub struct CountingFactory {
    name: String,
    mode: PresentationMode,
    count: Arc<AtomicUsize>,
    last_params: Arc<Mutex<Option<Parameters>>>,
    last_context: Arc<Mutex<Option<Context>>>,
}

impl CountingFactory {
    /// A factory producing a screen named `name` with an animated push.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mode: PresentationMode::default(),
            count: Arc::new(AtomicUsize::new(0)),
            last_params: Arc::new(Mutex::new(None)),
            last_context: Arc::new(Mutex::new(None)),
        }
    }

    /// Set the preferred mode of produced screens.
    pub fn with_mode(mut self, mode: PresentationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Number of `build` calls.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Parameters passed to the last `build` call.
    pub fn last_params(&self) -> Option<Parameters> {
        self.last_params.lock().clone()
    }

    /// Context passed to the last `build` call.
    pub fn last_context(&self) -> Option<Context> {
        self.last_context.lock().clone()
    }
}

impl ComponentFactory for CountingFactory {
    fn build(
        &self,
        params: Option<&Parameters>,
        ctx: Option<&Context>,
    ) -> Result<RouteResult, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock() = params.cloned();
        *self.last_context.lock() = ctx.cloned();
        Ok(RouteResult::component_with(
            TestScreen::new(self.name.clone()),
            self.mode.clone(),
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Recording Error Hook
// ============================================================================

/// An error hook that records the kind and URL of every error.
#[derive(Clone, Default)]
pub struct RecordingErrorHook {
    errors: Arc<Mutex<Vec<(ErrorKind, String)>>>,
}

impl RecordingErrorHook {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(kind, url)` pairs.
    pub fn errors(&self) -> Vec<(ErrorKind, String)> {
        self.errors.lock().clone()
    }

    /// Number of recorded errors.
    pub fn count(&self) -> usize {
        self.errors.lock().len()
    }
}

impl ErrorHook for RecordingErrorHook {
    fn on_error(&self, error: &RouterError) {
        self.errors
            .lock()
            .push((error.kind(), error.url().to_string()));
    }
}

// ============================================================================
// Recording Display
// ============================================================================

/// A transition performed on a [`RecordingDisplay`].
#[derive(Debug)]
pub enum DisplayEvent {
    /// `push` was called.
    Pushed {
        /// Target back-stack.
        stack: StackId,
        /// Pushed component.
        component: BoxComponent,
        /// Animation flag.
        animated: bool,
    },
    /// `present` was called.
    Presented {
        /// Presenting screen.
        from: ScreenId,
        /// Presented component.
        component: BoxComponent,
        /// Animation flag.
        animated: bool,
    },
}

impl DisplayEvent {
    /// The component involved.
    pub fn component(&self) -> &dyn Component {
        match self {
            DisplayEvent::Pushed { component, .. } | DisplayEvent::Presented { component, .. } => {
                component.as_ref()
            }
        }
    }
}

#[derive(Default)]
struct DisplayState {
    active: Option<ScreenId>,
    stacks: HashMap<ScreenId, StackId>,
    dismissing: HashSet<ScreenId>,
    dismissing_stacks: HashSet<StackId>,
    events: Vec<DisplayEvent>,
}

/// A display backend whose answers are scripted by the test and whose
/// transitions are recorded instead of shown.
///
/// Present completions run right after the transition is recorded.
#[derive(Default)]
pub struct RecordingDisplay {
    state: Mutex<DisplayState>,
}

impl RecordingDisplay {
    /// A display with no active screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`RecordingDisplay::set_active`].
    pub fn with_active(self, screen: ScreenId) -> Self {
        self.set_active(Some(screen));
        self
    }

    /// Builder-style [`RecordingDisplay::set_back_stack`].
    pub fn with_stack(self, screen: ScreenId, stack: StackId) -> Self {
        self.set_back_stack(screen, Some(stack));
        self
    }

    /// Set the active screen.
    pub fn set_active(&self, screen: Option<ScreenId>) {
        self.state.lock().active = screen;
    }

    /// Set (or remove) the back-stack containing `screen`.
    pub fn set_back_stack(&self, screen: ScreenId, stack: Option<StackId>) {
        let mut state = self.state.lock();
        match stack {
            Some(stack) => state.stacks.insert(screen, stack),
            None => state.stacks.remove(&screen),
        };
    }

    /// Mark `screen` as being dismissed.
    pub fn set_dismissing(&self, screen: ScreenId, dismissing: bool) {
        let mut state = self.state.lock();
        if dismissing {
            state.dismissing.insert(screen);
        } else {
            state.dismissing.remove(&screen);
        }
    }

    /// Mark `stack` as being dismissed.
    pub fn set_stack_dismissing(&self, stack: StackId, dismissing: bool) {
        let mut state = self.state.lock();
        if dismissing {
            state.dismissing_stacks.insert(stack);
        } else {
            state.dismissing_stacks.remove(&stack);
        }
    }

    /// Drain the recorded transitions.
    pub fn take_events(&self) -> Vec<DisplayEvent> {
        std::mem::take(&mut self.state.lock().events)
    }

    /// Number of recorded transitions not yet drained.
    pub fn event_count(&self) -> usize {
        self.state.lock().events.len()
    }
}

impl Display for RecordingDisplay {
    fn active_screen(&self) -> Option<ScreenId> {
        self.state.lock().active
    }

    fn back_stack(&self, screen: ScreenId) -> Option<StackId> {
        self.state.lock().stacks.get(&screen).copied()
    }

    fn push(&self, stack: StackId, component: BoxComponent, animated: bool) {
        self.state.lock().events.push(DisplayEvent::Pushed {
            stack,
            component,
            animated,
        });
    }

    fn present(
        &self,
        from: ScreenId,
        component: BoxComponent,
        animated: bool,
        completion: Option<Action>,
    ) {
        self.state.lock().events.push(DisplayEvent::Presented {
            from,
            component,
            animated,
        });
        if let Some(completion) = completion {
            completion();
        }
    }

    fn is_dismissing(&self, screen: ScreenId) -> bool {
        self.state.lock().dismissing.contains(&screen)
    }

    fn is_stack_dismissing(&self, stack: StackId) -> bool {
        self.state.lock().dismissing_stacks.contains(&stack)
    }
}

// ============================================================================
// Manual Scheduler
// ============================================================================

/// A scheduler that queues tasks until [`ManualScheduler::run_pending`].
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<Vec<(Duration, Task)>>,
    delays: Mutex<Vec<Duration>>,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every queued task, returning how many ran.
    pub fn run_pending(&self) -> usize {
        let tasks = std::mem::take(&mut *self.queue.lock());
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Every delay ever requested, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().clone()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) {
        self.delays.lock().push(delay);
        self.queue.lock().push((delay, task));
    }
}
