//! # Ariadne
//!
//! **An embeddable HTTP router built on a sorted routing table**
//!
//! - **Binary-search matching** – routes live in one sorted table; lookup
//!   narrows it segment by segment instead of walking a tree
//! - **Named parameters** – `/books/{id}` binds `id` for the handler
//! - **Literal precedence** – `/books/new` always beats `/books/{id}`
//! - **Composable middleware** – first added is outermost
//! - **Structured access logs and metrics** – via `tracing` and `metrics`
//!
//! ## Quick Start
//!
//! ```rust
//! use ariadne::prelude::*;
//!
//! let router = Router::new();
//! router
//!     .use_middleware(Logger::new())
//!     .get("/health", |_req: Request| async { Response::text(StatusCode::OK, "OK") })
//!     .get("/books/{id}", |req: Request| async move {
//!         let id = req.param("id").unwrap_or_default().to_string();
//!         Response::text(StatusCode::OK, format!("book {id}"))
//!     });
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ariadne-server      Router, dispatch, hyper adapter
//!   ├─ ariadne-middleware   Handler, Middleware, chain, recorder, Logger
//!   │    └─ ariadne-telemetry  logging + metrics setup
//!   └─ ariadne-router       Segment, Pattern, Register, Params
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the matching engine
pub use ariadne_router as router;

// Re-export handler and middleware types
pub use ariadne_middleware as middleware;

// Re-export the router and hyper integration
pub use ariadne_server as server;

// Re-export logging and metrics setup
pub use ariadne_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use ariadne::prelude::*;
///
/// let router = Router::new();
/// router.not_found(|_req: Request| async {
///     Response::json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "no such route")
/// });
/// ```
pub mod prelude {
    pub use ariadne_router::{clean_path, Params, RouteError};

    pub use ariadne_middleware::{
        FnMiddleware, Handler, Logger, LoggerConfig, Middleware, Next, Request, RequestExt,
        Response, ResponseExt, ResponseRecorder,
    };

    pub use ariadne_server::{hijack, serve_connection, Router, RouterService};

    pub use ariadne_telemetry::{init_telemetry, TelemetryConfig};

    pub use http::{Method, StatusCode};
}
