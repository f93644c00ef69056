//! Routing table entries.

use crate::segment::Pattern;

/// A registered (pattern, handler) pair.
///
/// Entries are immutable once created; the table only ever reorders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<H> {
    pattern: Pattern,
    handler: H,
}

impl<H> Entry<H> {
    /// Creates an entry from an already parsed pattern.
    #[must_use]
    pub fn new(pattern: Pattern, handler: H) -> Self {
        Self { pattern, handler }
    }

    /// The parsed pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The handler bound to the pattern.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }
}
