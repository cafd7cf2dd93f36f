//! Ready-made global hooks.
//!
//! - [`TracingErrorHook`]: logs every routing failure
//! - [`ErrorFanout`]: forwards failures to several error hooks
//! - [`InterruptChain`]: vetoes when any member vetoes
//! - [`PatternGuard`]: vetoes selected patterns when a predicate holds

mod conditional;
mod fanout;
mod logging;

pub use conditional::{InterruptChain, PatternGuard};
pub use fanout::ErrorFanout;
pub use logging::TracingErrorHook;
