//! Deferred execution for the transition-guard retry.
//!
//! A [`Scheduler`] runs a task once after a delay on whatever execution
//! context owns UI state. There is no cancellation: a scheduled task always
//! runs.

use std::time::Duration;
use tracing::warn;

#[cfg(feature = "tokio")]
mod runtime;

#[cfg(feature = "tokio")]
pub use runtime::TokioScheduler;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks once after a delay.
pub trait Scheduler: Send + Sync {
    /// Run `task` after `delay`.
    fn schedule_after(&self, delay: Duration, task: Task);
}

impl<T: Scheduler + ?Sized> Scheduler for std::sync::Arc<T> {
    fn schedule_after(&self, delay: Duration, task: Task) {
        (**self).schedule_after(delay, task)
    }
}

/// Runs each task on a detached std thread named `waypost-deferred` after
/// sleeping.
///
/// The retried dispatch therefore calls the [`Display`](waypost_core::Display)
/// from that background thread, not from the context that owns UI state.
/// Only use it with a display that is safe to drive from any thread (such as
/// [`ScreenTree`](crate::tree::ScreenTree)). Hosts with a UI loop should
/// implement [`Scheduler`] by posting the task onto that loop, or use
/// `TokioScheduler` on a single-threaded runtime that owns the UI state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) {
        let spawned = std::thread::Builder::new()
            .name("waypost-deferred".to_string())
            .spawn(move || {
                std::thread::sleep(delay);
                task();
            });
        if let Err(error) = spawned {
            warn!(%error, "failed to spawn deferred task; dropping it");
        }
    }
}
