//! Tokio-backed scheduler.

use super::{Scheduler, Task};
use std::time::Duration;
use tokio::runtime::Handle;

/// Spawns `sleep(delay)` followed by the task on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Schedule onto the runtime behind `handle`.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Schedule onto the runtime of the calling context, if inside one.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
