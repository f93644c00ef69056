//! The sorted routing table.
//!
//! A [`Register`] keeps its entries sorted by [`Pattern::compare`]. Within
//! any run of entries whose first `d` segments compare equal, the entries
//! are further ordered by segment `d`: patterns that end at `d` first, then
//! literals in lexicographic order, then parameters. Lookup exploits this by
//! narrowing the run one segment at a time with binary searches, trying the
//! literal sub-run before the parameter sub-run, so a literal route always
//! wins over a parameterized one at the same position.

use std::ops::Range;

use crate::entry::Entry;
use crate::error::RouteError;
use crate::segment::{clean_path, tokens, Pattern, Segment};
use crate::RouteMatch;

/// A sorted collection of [`Entry`] values supporting binary-search lookup.
///
/// # Example
///
/// ```rust
/// use ariadne_router::Register;
///
/// let register = Register::new()
///     .add("/api/v2/books", "listBooks")
///     .add("/api/v2/{id}", "getById");
///
/// let found = register.find("/api/v2/books").unwrap();
/// assert_eq!(*found.entry.handler(), "listBooks");
///
/// let found = register.find("/api/v2/42").unwrap();
/// assert_eq!(*found.entry.handler(), "getById");
/// assert_eq!(found.params.get("id"), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct Register<H> {
    entries: Vec<Entry<H>>,
}

impl<H> Default for Register<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Register<H> {
    /// Creates an empty register.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parses `pattern`, inserts it and returns the updated register.
    ///
    /// Entries that compare equal keep their insertion order, so the first
    /// registration of a duplicate pattern is the one [`find`](Self::find)
    /// returns.
    #[must_use]
    pub fn add(mut self, pattern: &str, handler: H) -> Self {
        self.insert(pattern, handler);
        self
    }

    /// In-place form of [`add`](Self::add).
    pub fn insert(&mut self, pattern: &str, handler: H) {
        let entry = Entry::new(Pattern::parse(pattern), handler);
        // Upper bound: after every entry that compares <= the new one.
        let index = self
            .entries
            .partition_point(|existing| existing.pattern().compare(entry.pattern()).is_le());
        self.entries.insert(index, entry);
    }

    /// Resolves a concrete request path.
    ///
    /// The path is normalized with [`clean_path`] and split into tokens; every
    /// token is treated as a literal, so a request for `/{id}` only matches a
    /// literal `{id}` segment or a parameter.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] when no entry matches.
    pub fn find(&self, path: &str) -> Result<RouteMatch<'_, H>, RouteError> {
        if self.entries.is_empty() {
            return Err(RouteError::NotFound);
        }

        let cleaned = clean_path(path);
        let concrete: Vec<&str> = tokens(&cleaned).collect();

        let index = self
            .search(0..self.entries.len(), 0, &concrete)
            .ok_or(RouteError::NotFound)?;
        let entry = &self.entries[index];

        Ok(RouteMatch::new(entry, entry.pattern().params(&concrete)))
    }

    /// Narrows `range` (entries equal on their first `depth` segments) to
    /// the first entry matching `concrete` from `depth` on.
    fn search(&self, range: Range<usize>, depth: usize, concrete: &[&str]) -> Option<usize> {
        let run = &self.entries[range.clone()];

        let ended = run.partition_point(|entry| entry.pattern().len() <= depth);
        let Some(&token) = concrete.get(depth) else {
            return (ended > 0).then_some(range.start);
        };

        let rest = &run[ended..];
        let offset = range.start + ended;
        let literals = rest.partition_point(|entry| !segment_at(entry, depth).is_param());

        let block = &rest[..literals];
        let lower = block.partition_point(|entry| segment_at(entry, depth).probe(token).is_lt());
        let upper = block.partition_point(|entry| segment_at(entry, depth).probe(token).is_le());

        if lower < upper {
            if let Some(found) = self.search(offset + lower..offset + upper, depth + 1, concrete) {
                return Some(found);
            }
        }

        if literals < rest.len() && !token.is_empty() {
            return self.search(offset + literals..range.end, depth + 1, concrete);
        }

        None
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<H>> {
        self.entries.iter()
    }
}

impl<'a, H> IntoIterator for &'a Register<H> {
    type Item = &'a Entry<H>;
    type IntoIter = std::slice::Iter<'a, Entry<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Segment `depth` of an entry known to be longer than `depth`.
fn segment_at<H>(entry: &Entry<H>, depth: usize) -> &Segment {
    &entry.pattern().segments()[depth]
}
