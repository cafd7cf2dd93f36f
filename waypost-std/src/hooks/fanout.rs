//! Fan-out for error hooks.

use std::{fmt, sync::Arc};
use waypost_core::{ErrorHook, RouterError};

/// Forwards each error to every member, in insertion order.
#[derive(Clone, Default)]
pub struct ErrorFanout {
    hooks: Vec<Arc<dyn ErrorHook>>,
}

impl ErrorFanout {
    /// Create an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member.
    pub fn with(mut self, hook: impl ErrorHook + 'static) -> Self {
        self.push(hook);
        self
    }

    /// Add a member.
    pub fn push(&mut self, hook: impl ErrorHook + 'static) {
        self.hooks.push(Arc::new(hook));
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

impl ErrorHook for ErrorFanout {
    fn on_error(&self, error: &RouterError) {
        for hook in &self.hooks {
            hook.on_error(error);
        }
    }
}

impl fmt::Debug for ErrorFanout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFanout")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingErrorHook;
    use waypost_core::ErrorKind;

    #[test]
    fn test_every_member_sees_error() {
        let first = RecordingErrorHook::new();
        let second = RecordingErrorHook::new();
        let fanout = ErrorFanout::new().with(first.clone()).with(second.clone());
        assert_eq!(fanout.len(), 2);

        fanout.on_error(&RouterError::Interrupt {
            url: "myapp://admin".into(),
        });
        assert_eq!(first.errors(), second.errors());
        assert_eq!(first.errors()[0].0, ErrorKind::Interrupt);
    }
}
