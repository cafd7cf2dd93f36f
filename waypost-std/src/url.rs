//! URL parsing.
//!
//! Accepted shape: `scheme://pattern[?key1=val1&key2=val2&...]`. No
//! percent-decoding and no array/bracket syntax; keys and values must not
//! contain `&`, `=` or `?`. Malformed input degrades to fewer parameters and is
//! never an error.

use std::borrow::Cow;
use tracing::trace;
use waypost_core::{Parameters, Pattern, Scheme};

/// A URL split into its routing parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// The scheme-normalized URL.
    pub url: String,
    /// The pattern portion (everything before the first `?`).
    pub pattern: Pattern,
    /// Decoded query, `None` when the URL has no `?`.
    pub params: Option<Parameters>,
}

/// Prefix `url` with `scheme` unless it already starts with it.
///
/// Idempotent; without a scheme the URL is returned unchanged.
pub fn normalize_scheme<'a>(url: &'a str, scheme: Option<&Scheme>) -> Cow<'a, str> {
    match scheme {
        Some(scheme) => scheme.apply(url),
        None => Cow::Borrowed(url),
    }
}

/// Split on the first `?`.
///
/// Everything after the first `?` is the raw query, including any further `?`.
pub fn split_pattern_and_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((pattern, query)) => (pattern, Some(query)),
        None => (url, None),
    }
}

/// Decode `k=v&k2=v2` into [`Parameters`].
///
/// Pieces that do not split into exactly two parts on `=`, or whose key is
/// empty, are dropped. A repeated key keeps its last value.
pub fn decode_query(query: &str) -> Parameters {
    let mut params = Parameters::new();
    for piece in query.split('&') {
        let mut parts = piece.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) if !key.is_empty() => params.set(key, value),
            _ => trace!(piece, "dropping malformed query piece"),
        }
    }
    params
}

/// Normalize, split and decode `url`.
pub fn parse(url: &str, scheme: Option<&Scheme>) -> ParsedUrl {
    let url = normalize_scheme(url, scheme).into_owned();
    let (pattern, query) = split_pattern_and_query(&url);
    let pattern = Pattern::new(pattern);
    let params = query.map(decode_query);
    ParsedUrl {
        url,
        pattern,
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_query() {
        let params = decode_query("a=1&b=2");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("2"));
        assert_eq!(params.len(), 2);

        let params = decode_query("a=1&bad&c=3");
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("c"), Some("3"));
        assert!(!params.contains_key("bad"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_decode_query_drops_malformed() {
        let params = decode_query("=1&a=b=c&&k=");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("k"), Some(""));
    }

    #[test]
    fn test_decode_query_repeated_key() {
        let params = decode_query("tab=1&tab=2");
        assert_eq!(params.get("tab"), Some("2"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let scheme = Scheme::new("myapp");
        for url in ["profile", "myapp://profile", "other://x", ""] {
            let once = normalize_scheme(url, Some(&scheme)).into_owned();
            let twice = normalize_scheme(&once, Some(&scheme)).into_owned();
            assert_eq!(once, twice);
            assert!(once.starts_with("myapp://"));
        }
        assert_eq!(normalize_scheme("profile", None), "profile");
    }

    #[test]
    fn test_split_on_first_question_mark() {
        assert_eq!(split_pattern_and_query("a://p"), ("a://p", None));
        assert_eq!(split_pattern_and_query("a://p?x=1"), ("a://p", Some("x=1")));
        assert_eq!(
            split_pattern_and_query("a://p?x=1?y=2"),
            ("a://p", Some("x=1?y=2"))
        );
    }

    #[test]
    fn test_parse() {
        let scheme = Scheme::new("myapp");
        let parsed = parse("profile?id=42", Some(&scheme));
        assert_eq!(parsed.url, "myapp://profile?id=42");
        assert_eq!(parsed.pattern.as_str(), "myapp://profile");
        assert_eq!(parsed.params.unwrap().get("id"), Some("42"));

        let parsed = parse("myapp://home", Some(&scheme));
        assert!(parsed.params.is_none());

        let parsed = parse("home?", None);
        assert_eq!(parsed.params, Some(Parameters::new()));
    }
}
