//! Ordered middleware lists.
//!
//! The first middleware appended is the outermost: for `[m1, m2]` around
//! handler `h`, a request flows `m1 → m2 → h` and the response flows back
//! `h → m2 → m1`.

use crate::handler::Endpoint;
use crate::middleware::{wrap, Middleware};
use std::fmt;
use std::sync::Arc;

/// An ordered list of middleware.
#[derive(Clone, Default)]
pub struct Middlewares {
    stack: Vec<Arc<dyn Middleware>>,
}

impl Middlewares {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one middleware.
    pub fn push<M: Middleware>(&mut self, middleware: M) {
        self.stack.push(Arc::new(middleware));
    }

    /// Number of middleware in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Middleware names, outermost first.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.stack.iter().map(|m| m.name()).collect()
    }

    /// Composes the list around `terminal`.
    ///
    /// With an empty list the terminal is returned unchanged.
    #[must_use]
    pub fn chain(&self, terminal: Endpoint) -> Endpoint {
        self.stack
            .iter()
            .rev()
            .fold(terminal, |next, middleware| wrap(Arc::clone(middleware), next))
    }
}

impl fmt::Debug for Middlewares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
