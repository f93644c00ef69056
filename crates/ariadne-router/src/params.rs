//! Values bound to `{name}` segments by a successful lookup.
//!
//! A lookup produces one [`Params`] per request; the router moves it into
//! the request's [`http::Extensions`] before the handler runs.

use http::Extensions;
use smallvec::SmallVec;

const INLINE_PARAMS: usize = 4;

/// Parameter bindings of one matched route, in pattern order.
///
/// A name bound twice (`/pairs/{id}/{id}`) keeps the later value.
///
/// # Example
///
/// ```rust
/// use ariadne_router::Params;
///
/// let mut params = Params::new();
/// params.insert("userId", "123");
/// params.insert("action", "view");
///
/// assert_eq!(params.get("userId"), Some("123"));
/// assert_eq!(params.get_or("unknown", "none"), "none");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates a new empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.inner.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.inner.push((name, value)),
        }
    }

    /// Returns the value for a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value for `name`, or `fallback` when unbound.
    #[must_use]
    pub fn get_or<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.get(name).unwrap_or(fallback)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Attaches these parameters to a request's extensions, replacing any
    /// set attached earlier.
    pub fn attach(self, extensions: &mut Extensions) {
        extensions.insert(self);
    }

    /// Reads the parameters attached to a request's extensions.
    ///
    /// Returns `None` when the request was never resolved by the router.
    #[must_use]
    pub fn from_extensions(extensions: &Extensions) -> Option<&Self> {
        extensions.get::<Self>()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Params {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}
