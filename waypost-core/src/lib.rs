//! # waypost-core
//!
//! Core contracts for the Waypost URL navigation router.
//!
//! This crate has minimal dependencies and is meant to be imported by feature
//! modules that only need to declare screens and factories, without pulling in
//! the router implementation from `waypost-std`.
//!
//! # Pipeline
//!
//! A call to `route(url, ctx, mode)` goes through four stages:
//!
//! ## Stage 1: Parsing
//!
//! The URL is prefixed with the configured [`Scheme`] when it lacks it, split
//! into a [`Pattern`] and a query string, and the query is decoded into
//! [`Parameters`].
//!
//! ## Stage 2: Lookup
//!
//! The pattern is matched exactly against the registered factories. A miss is
//! [`RouterError::NoMatchPattern`].
//!
//! ## Stage 3: Interrupt and build
//!
//! The [`InterruptHook`] may veto the request ([`RouterError::Interrupt`]);
//! otherwise the matched [`ComponentFactory`] produces a [`RouteResult`].
//!
//! ## Stage 4: Dispatch
//!
//! Actions run; components are pushed or presented through the [`Display`]
//! backend according to their [`PresentationMode`].
//!
//! Every failure is reported once to the [`ErrorHook`] and then returned.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod component;
mod display;
mod error;
mod hook;
mod params;
mod pattern;
mod presentation;

// Re-exports
pub use component::{
    Action, AsAny, BoxComponent, Component, ComponentFactory, FnFactory, RouteMap, RouteResult,
    TryFnFactory, factory_fn,
};
pub use display::{Display, ScreenId, StackId};
pub use error::{BoxError, ErrorKind, RouterError};
pub use hook::{ErrorHook, InterruptHook, InterruptRequest};
pub use params::{Context, Parameters};
pub use pattern::{IntoPattern, Pattern, Scheme};
pub use presentation::{PresentationMode, PresentationStyle, Wrapper};
