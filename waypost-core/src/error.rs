//! Error types for Waypost.
//!
//! Routing failures form a closed set:
//!
//! - [`RouterError::NoMatchPattern`] - nothing is registered for the pattern
//! - [`RouterError::Interrupt`] - the interrupt hook vetoed the request
//! - [`RouterError::NoPresentBase`] - no screen to present from
//! - [`RouterError::NoPushBase`] - no back-stack to push onto
//! - [`RouterError::Rejected`] - the matched factory refused to build

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while routing a URL.
///
/// Every variant carries the scheme-normalized URL that was being routed.
#[derive(Error, Debug)]
pub enum RouterError {
    /// No factory is registered for the URL's pattern.
    #[error("no route registered for url: {url}")]
    NoMatchPattern {
        /// The normalized URL.
        url: String,
    },

    /// The global interrupt hook cancelled the request.
    #[error("route interrupted: {url}")]
    Interrupt {
        /// The normalized URL.
        url: String,
    },

    /// There is no active screen to present from.
    #[error("no screen to present from for url: {url}")]
    NoPresentBase {
        /// The normalized URL.
        url: String,
    },

    /// The active screen has no back-stack to push onto.
    #[error("no back-stack to push onto for url: {url}")]
    NoPushBase {
        /// The normalized URL.
        url: String,
    },

    /// The matched factory refused to build a result.
    #[error("factory rejected url: {url}")]
    Rejected {
        /// The normalized URL.
        url: String,
        /// Why the factory refused.
        #[source]
        source: BoxError,
    },
}

/// Discriminant of a [`RouterError`], convenient for matching in hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RouterError::NoMatchPattern`].
    NoMatchPattern,
    /// See [`RouterError::Interrupt`].
    Interrupt,
    /// See [`RouterError::NoPresentBase`].
    NoPresentBase,
    /// See [`RouterError::NoPushBase`].
    NoPushBase,
    /// See [`RouterError::Rejected`].
    Rejected,
}

impl RouterError {
    /// The normalized URL the error refers to.
    pub fn url(&self) -> &str {
        match self {
            RouterError::NoMatchPattern { url }
            | RouterError::Interrupt { url }
            | RouterError::NoPresentBase { url }
            | RouterError::NoPushBase { url }
            | RouterError::Rejected { url, .. } => url,
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouterError::NoMatchPattern { .. } => ErrorKind::NoMatchPattern,
            RouterError::Interrupt { .. } => ErrorKind::Interrupt,
            RouterError::NoPresentBase { .. } => ErrorKind::NoPresentBase,
            RouterError::NoPushBase { .. } => ErrorKind::NoPushBase,
            RouterError::Rejected { .. } => ErrorKind::Rejected,
        }
    }
}
