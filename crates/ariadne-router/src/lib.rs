//! Sorted-table route matching engine for Ariadne.
//!
//! This crate resolves a concrete request path to exactly one registered
//! entry in logarithmic time per path segment. Instead of a tree, routes
//! live in a single table kept sorted by a custom pattern ordering, and
//! lookup narrows that table with binary searches.
//!
//! # Features
//!
//! - **Sorted Table Matching**: one `Vec`, binary search per segment
//! - **Path Parameters**: extract named parameters from paths (`/users/{id}`)
//! - **Static Precedence**: `/users/me` always beats `/users/{id}`
//! - **Method Keys**: the HTTP method is the first literal segment of every key
//! - **Stable Duplicates**: the first registration of a pattern wins
//!
//! # Example
//!
//! ```rust
//! use ariadne_router::{route_key, Register};
//!
//! let register = Register::new()
//!     .add(&route_key("GET", "/users"), "listUsers")
//!     .add(&route_key("GET", "/users/{id}"), "getUser")
//!     .add(&route_key("GET", "/users/me"), "getCurrentUser");
//!
//! let m = register.find(&route_key("GET", "/users/123")).unwrap();
//! assert_eq!(*m.entry.handler(), "getUser");
//! assert_eq!(m.params.get("id"), Some("123"));
//!
//! let m = register.find(&route_key("GET", "/users/me")).unwrap();
//! assert_eq!(*m.entry.handler(), "getCurrentUser");
//! ```
//!
//! # Table Layout
//!
//! ```text
//!   /GET/users               ← shorter patterns first
//!   /GET/users/me            ← literals, lexicographic
//!   /GET/users/{id}          ← parameters after literals
//!   /POST/users
//! ```

mod entry;
mod error;
mod params;
mod register;
mod segment;

pub use entry::Entry;
pub use error::RouteError;
pub use params::Params;
pub use register::Register;
pub use segment::{any_method_key, clean_path, route_key, Pattern, Segment, ANY_METHOD};

/// A resolved entry with its extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, H> {
    /// The matched entry
    pub entry: &'a Entry<H>,
    /// Extracted path parameters
    pub params: Params,
}

impl<'a, H> RouteMatch<'a, H> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(entry: &'a Entry<H>, params: Params) -> Self {
        Self { entry, params }
    }

    /// The handler of the matched entry.
    #[must_use]
    pub fn handler(&self) -> &'a H {
        self.entry.handler()
    }
}
