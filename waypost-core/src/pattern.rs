//! Route patterns and the URL scheme used to normalize them.

use std::{borrow::Cow, fmt};

const SCHEME_SEPARATOR: &str = "://";

/// A configured URL scheme, always stored with its `://` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scheme(String);

impl Scheme {
    /// Create a scheme, appending `://` when absent.
    ///
    /// `"myapp"` and `"myapp://"` produce the same scheme.
    pub fn new(scheme: impl Into<String>) -> Self {
        let mut scheme = scheme.into();
        if !scheme.ends_with(SCHEME_SEPARATOR) {
            scheme.push_str(SCHEME_SEPARATOR);
        }
        Self(scheme)
    }

    /// The scheme including its `://` suffix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prepend this scheme to `url` unless it already starts with it.
    pub fn apply<'a>(&self, url: &'a str) -> Cow<'a, str> {
        if url.starts_with(&self.0) {
            Cow::Borrowed(url)
        } else {
            Cow::Owned(format!("{}{}", self.0, url))
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A route key: the part of a URL before the query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(String);

impl Pattern {
    /// Create a pattern from a string, without normalization.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Normalize this pattern against an optional scheme.
    pub fn normalized(self, scheme: Option<&Scheme>) -> Self {
        match scheme {
            Some(scheme) if !self.0.starts_with(scheme.as_str()) => {
                Self(format!("{}{}", scheme.as_str(), self.0))
            }
            _ => self,
        }
    }

    /// The pattern as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the pattern, returning its string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Anything usable as a route pattern.
pub trait IntoPattern {
    /// Convert into a [`Pattern`].
    fn into_pattern(self) -> Pattern;
}

impl IntoPattern for Pattern {
    fn into_pattern(self) -> Pattern {
        self
    }
}

impl IntoPattern for &Pattern {
    fn into_pattern(self) -> Pattern {
        self.clone()
    }
}

impl IntoPattern for &str {
    fn into_pattern(self) -> Pattern {
        Pattern::new(self)
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> Pattern {
        Pattern(self)
    }
}

impl IntoPattern for &String {
    fn into_pattern(self) -> Pattern {
        Pattern::new(self.as_str())
    }
}
