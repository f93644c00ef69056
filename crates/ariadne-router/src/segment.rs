//! Path segments and patterns.
//!
//! A pattern such as `/api/v2/users/{userId}/books` is split on `/` into
//! an ordered sequence of [`Segment`]s. Each segment is either a literal,
//! matched byte-for-byte, or a named parameter written as `{name}`.
//!
//! The HTTP method is folded into the pattern as its first literal segment
//! (see [`route_key`]), so the method and the path share one ordering and
//! one lookup.
//!
//! # Ordering
//!
//! Patterns are totally pre-ordered, segment by segment:
//!
//! - literal vs literal compares lexicographically
//! - a literal always orders before a parameter
//! - two parameters compare equal, whatever their names
//! - when every common segment compares equal, the shorter pattern comes first
//!
//! ```rust
//! use ariadne_router::Pattern;
//! use std::cmp::Ordering;
//!
//! let literal = Pattern::parse("/api/v2/books");
//! let param = Pattern::parse("/api/v2/{id}");
//!
//! assert_eq!(literal.compare(&param), Ordering::Less);
//! assert_eq!(param.compare(&literal), Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

/// Segments stored inline before spilling to the heap.
const INLINE_SEGMENTS: usize = 8;

/// Name of the parameter occupying the method position of routes that
/// accept any HTTP method.
pub const ANY_METHOD: &str = "http_method";

/// One slash-delimited token of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches exactly this string (case-sensitive).
    Literal(String),
    /// Matches any single non-empty token and binds it to this name.
    Param(String),
}

impl Segment {
    /// Parses a single token. `{name}` becomes a parameter, anything else
    /// is a literal.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Some(name) => Self::Param(name.to_string()),
            None => Self::Literal(token.to_string()),
        }
    }

    /// Returns true for parameter segments.
    #[must_use]
    pub fn is_param(&self) -> bool {
        matches!(self, Self::Param(_))
    }

    /// Parameter name, or `None` for literals.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Param(name) => Some(name),
            Self::Literal(_) => None,
        }
    }

    /// Literal text, or `None` for parameters.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Param(_) => None,
        }
    }

    /// Compares two stored segments.
    ///
    /// Literals order before parameters; parameters are mutually equal.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a.cmp(b),
            (Self::Literal(_), Self::Param(_)) => Ordering::Less,
            (Self::Param(_), Self::Literal(_)) => Ordering::Greater,
            (Self::Param(_), Self::Param(_)) => Ordering::Equal,
        }
    }

    /// Compares this stored segment against a concrete request token.
    ///
    /// A parameter compares equal to any non-empty token.
    #[must_use]
    pub fn probe(&self, token: &str) -> Ordering {
        match self {
            Self::Literal(text) => text.as_str().cmp(token),
            Self::Param(_) if token.is_empty() => Ordering::Greater,
            Self::Param(_) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Param(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// A parsed, normalized path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    segments: SmallVec<[Segment; INLINE_SEGMENTS]>,
}

impl Pattern {
    /// Parses a pattern after normalizing it with [`clean_path`].
    ///
    /// The leading separator does not produce a segment, so `/` parses to a
    /// single empty literal and `/users/{id}` to `users`, `{id}`.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let cleaned = clean_path(pattern);
        Self {
            segments: tokens(&cleaned).map(Segment::parse).collect(),
        }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the pattern has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Iterates over parameter names in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::name)
    }

    /// Total order used to sort the routing table.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.segments
            .iter()
            .zip(other.segments.iter())
            .map(|(a, b)| a.compare(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.len().cmp(&other.len()))
    }

    /// Compares this stored pattern against concrete request tokens, with
    /// parameters equal to any non-empty token at their position.
    #[must_use]
    pub fn probe(&self, concrete: &[&str]) -> Ordering {
        self.segments
            .iter()
            .zip(concrete.iter())
            .map(|(segment, token)| segment.probe(token))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| self.len().cmp(&concrete.len()))
    }

    /// Binds parameters by zipping this pattern against concrete tokens.
    ///
    /// Parameters past the end of `concrete` stay unbound.
    #[must_use]
    pub fn params(&self, concrete: &[&str]) -> crate::Params {
        self.segments
            .iter()
            .zip(concrete.iter())
            .filter_map(|(segment, token)| {
                segment.name().map(|name| (name, *token))
            })
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Canonicalizes a path.
///
/// Repeated separators collapse, `.` elements drop, `..` removes the
/// previous element (never climbing above the root), a trailing separator
/// is stripped and a leading one is guaranteed. The root stays `/`.
///
/// ```rust
/// use ariadne_router::clean_path;
///
/// assert_eq!(clean_path("/test//test///"), "/test/test");
/// assert_eq!(clean_path("users/./42/../7"), "/users/7");
/// assert_eq!(clean_path(""), "/");
/// ```
#[must_use]
pub fn clean_path(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();

    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    if stack.is_empty() {
        return "/".to_string();
    }

    let mut cleaned = String::with_capacity(path.len() + 1);
    for element in stack {
        cleaned.push('/');
        cleaned.push_str(element);
    }
    cleaned
}

/// Builds the composite lookup key for a method and a path.
///
/// ```rust
/// use ariadne_router::route_key;
///
/// assert_eq!(route_key("GET", "/"), "/GET");
/// assert_eq!(route_key("POST", "/test//"), "/POST/test");
/// ```
#[must_use]
pub fn route_key(method: &str, path: &str) -> String {
    clean_path(&format!("{method}/{path}"))
}

/// Builds the key for a route that answers every method.
#[must_use]
pub fn any_method_key(path: &str) -> String {
    route_key(&format!("{{{ANY_METHOD}}}"), path)
}

/// Splits a cleaned path into tokens, dropping the empty token produced by
/// the leading separator.
pub(crate) fn tokens(cleaned: &str) -> impl Iterator<Item = &str> {
    cleaned.strip_prefix('/').unwrap_or(cleaned).split('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn literal(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn param(s: &str) -> Segment {
        Segment::Param(s.to_string())
    }

    #[test]
    fn test_clean_path() {
        let cases = [
            ("/", "/"),
            ("", "/"),
            ("/test", "/test"),
            ("/test/", "/test"),
            ("/test//", "/test"),
            ("/test//test", "/test/test"),
            ("/test//test///", "/test/test"),
            ("/test//test//test//test//test", "/test/test/test/test/test"),
            ("test", "/test"),
            ("/a/./b", "/a/b"),
            ("/a/b/..", "/a"),
            ("/../a", "/a"),
            ("//", "/"),
        ];

        for (input, want) in cases {
            assert_eq!(clean_path(input), want, "clean_path({input:?})");
        }
    }

    #[test]
    fn test_segment_parse() {
        assert_eq!(Segment::parse("{test}"), param("test"));
        assert_eq!(Segment::parse("test"), literal("test"));
        assert_eq!(Segment::parse("{}"), param(""));
        assert_eq!(Segment::parse("{open"), literal("{open"));
        assert_eq!(Segment::parse(":id"), literal(":id"));
        assert_eq!(Segment::parse(""), literal(""));
    }

    #[test]
    fn test_segment_name() {
        assert_eq!(param("test").name(), Some("test"));
        assert_eq!(literal("test").name(), None);
        assert_eq!(literal("test").literal(), Some("test"));
    }

    #[test]
    fn test_segment_compare() {
        assert_eq!(literal("test").compare(&literal("test")), Ordering::Equal);
        assert_eq!(literal("a").compare(&literal("b")), Ordering::Less);
        assert_eq!(literal("test").compare(&param("test")), Ordering::Less);
        assert_eq!(param("test").compare(&literal("test")), Ordering::Greater);
        assert_eq!(param("test").compare(&param("test2")), Ordering::Equal);
    }

    #[test]
    fn test_segment_probe() {
        assert_eq!(param("id").probe("42"), Ordering::Equal);
        assert_eq!(param("id").probe(""), Ordering::Greater);
        assert_eq!(literal("books").probe("books"), Ordering::Equal);
        assert_eq!(literal("a").probe("b"), Ordering::Less);
    }

    #[test]
    fn test_pattern_parse() {
        assert_eq!(Pattern::parse("/").segments(), &[literal("")]);
        assert_eq!(Pattern::parse("/test/").segments(), &[literal("test")]);
        assert_eq!(
            Pattern::parse("/test//{id}//").segments(),
            &[literal("test"), param("id")]
        );
        assert_eq!(
            Pattern::parse("/:arg1/:arg2/").segments(),
            &[literal(":arg1"), literal(":arg2")]
        );
    }

    #[test]
    fn test_pattern_compare_length() {
        let short = Pattern::parse("/test");
        let long = Pattern::parse("/test/test");

        assert_eq!(short.compare(&long), Ordering::Less);
        assert_eq!(long.compare(&short), Ordering::Greater);
        assert_eq!(short.compare(&short.clone()), Ordering::Equal);
    }

    #[test]
    fn test_pattern_compare_param_positions() {
        let comments = Pattern::parse("/PATCH/repos/{owner}/{repo}/pulls/comments/{number}");
        let pulls = Pattern::parse("/PATCH/repos/{owner}/{repo}/pulls/{number}");
        assert_eq!(comments.compare(&pulls), Ordering::Less);
        assert_eq!(pulls.compare(&comments), Ordering::Greater);

        let blobs = Pattern::parse("/GET/repos/{owner}/{repo}/git/blobs/{sha}");
        let downloads = Pattern::parse("/GET/repos/{owner}/{repo}/downloads/{id}");
        assert_eq!(blobs.compare(&downloads), Ordering::Greater);
        assert_eq!(downloads.compare(&blobs), Ordering::Less);

        let all_params = Pattern::parse("/{a}/{b}/{c}");
        let renamed = Pattern::parse("/{x}/{y}/{z}");
        assert_eq!(all_params.compare(&renamed), Ordering::Equal);
    }

    #[test]
    fn test_pattern_probe() {
        let pattern = Pattern::parse("/{arg1}/{arg2}/{arg3}");
        assert_eq!(pattern.probe(&["a", "b", "c"]), Ordering::Equal);
        assert_eq!(pattern.probe(&["a", "b", "c", "d"]), Ordering::Less);
        assert_eq!(pattern.probe(&["a", "b"]), Ordering::Greater);

        let mixed = Pattern::parse("/test/{id}");
        assert_eq!(mixed.probe(&["test", "test", "test"]), Ordering::Less);
        assert_eq!(mixed.probe(&["zzz", "1"]), Ordering::Less);
    }

    #[test]
    fn test_pattern_params() {
        let pattern = Pattern::parse("/{arg1}/{arg2}/{arg3}");

        let full = pattern.params(&["a", "b", "c"]);
        assert_eq!(full.get("arg1"), Some("a"));
        assert_eq!(full.get("arg3"), Some("c"));

        let extra = pattern.params(&["a", "b", "c", "d"]);
        assert_eq!(extra.len(), 3);

        let short = pattern.params(&["a", "b"]);
        assert_eq!(short.len(), 2);
        assert_eq!(short.get("arg3"), None);

        assert!(Pattern::parse("/test").params(&["test"]).is_empty());
    }

    #[test]
    fn test_pattern_display() {
        assert_eq!(Pattern::parse("/users//{id}/").to_string(), "/users/{id}");
    }

    #[test]
    fn test_route_key() {
        assert_eq!(route_key("GET", "/"), "/GET");
        assert_eq!(route_key("POST", "/test"), "/POST/test");
        assert_eq!(route_key("PATCH", "/test/{id}"), "/PATCH/test/{id}");
        assert_eq!(route_key("DELETE", "test/123"), "/DELETE/test/123");
        assert_eq!(any_method_key("/users"), "/{http_method}/users");
    }

    proptest! {
        #[test]
        fn prop_clean_path_idempotent(path in "[a-z./]{0,24}") {
            let once = clean_path(&path);
            prop_assert_eq!(clean_path(&once), once.clone());
            prop_assert!(once.starts_with('/'));
            prop_assert!(once == "/" || !once.ends_with('/'));
            prop_assert!(!once.contains("//"));
        }
    }
}
