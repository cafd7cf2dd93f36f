//! # waypost-std
//!
//! Standard implementations for the Waypost URL navigation router.
//!
//! This crate provides:
//! - **Routing**: [`Router`], [`RouterBuilder`], [`RouteRequest`]
//! - **Registry**: [`store::PatternStore`] with exact-match lookup
//! - **Parsing**: the [`url`] module
//! - **Dispatch**: [`dispatcher::Dispatcher`] with the dismissal retry
//! - **Discovery**: cached bulk registration in [`discovery`]
//! - **Standard hooks**: tracing, fan-out, chains and pattern guards
//! - **Display**: the in-memory [`tree::ScreenTree`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use waypost_core;

// Modules
pub mod discovery;
pub mod dispatcher;
pub mod hooks;
pub mod resolver;
pub mod router;
pub mod schedule;
pub mod store;
pub mod testing;
pub mod tree;
pub mod url;

pub use router::{RouteRequest, Router, RouterBuilder, RouterConfig};

#[cfg(feature = "inventory")]
pub use inventory;
