//! Logging hook for routing failures.

use tracing::warn;
use waypost_core::{ErrorHook, RouterError};

/// An error hook that logs failures through `tracing` at `WARN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorHook;

impl ErrorHook for TracingErrorHook {
    fn on_error(&self, error: &RouterError) {
        match std::error::Error::source(error) {
            Some(source) => warn!(
                url = error.url(),
                kind = ?error.kind(),
                %source,
                "route failed: {error}"
            ),
            None => warn!(url = error.url(), kind = ?error.kind(), "route failed: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_without_subscriber() {
        TracingErrorHook.on_error(&RouterError::NoMatchPattern {
            url: "myapp://x".into(),
        });
        TracingErrorHook.on_error(&RouterError::Rejected {
            url: "myapp://y".into(),
            source: "bad id".into(),
        });
    }
}
