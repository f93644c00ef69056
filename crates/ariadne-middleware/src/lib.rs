//! # Ariadne Middleware
//!
//! Handler and middleware types shared by the Ariadne router.
//!
//! Middleware run in the order they were added: the first one added is the
//! outermost and sees the request first and the response last.
//!
//! ```text
//! Request  → M1 → M2 → Handler
//!                         ↓
//! Response ← M1 ← M2 ←────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Handler`] | Turns a request into a response; any async closure qualifies |
//! | [`Middleware`] | Wraps downstream processing through [`Next`] |
//! | [`Middlewares`] | Ordered list composed around a terminal [`Endpoint`] |
//! | [`ResponseRecorder`] | Write-once status capture readable by outer middleware |
//! | [`Logger`] | Access-log middleware |
//!
//! ## Example
//!
//! ```
//! use ariadne_middleware::{FnMiddleware, Middlewares, Next, Request, Response, ResponseExt};
//! use http::StatusCode;
//!
//! let mut middlewares = Middlewares::new();
//! middlewares.push(FnMiddleware::new("noop", |req: Request, next: Next| async move {
//!     next.run(req).await
//! }));
//!
//! let endpoint = middlewares.chain(ariadne_middleware::endpoint(ariadne_middleware::boxed(
//!     |_req: Request| async { Response::text(StatusCode::OK, "OK") },
//! )));
//! # let _ = endpoint;
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod context;
pub mod handler;
pub mod logger;
pub mod middleware;
pub mod recorder;
pub mod types;

pub use chain::Middlewares;
pub use context::RequestExt;
pub use handler::{boxed, endpoint, not_found, BoxedHandler, Endpoint, Handler, NOT_FOUND_BODY};
pub use logger::{Logger, LoggerConfig};
pub use middleware::{FnMiddleware, Middleware, Next};
pub use recorder::ResponseRecorder;
pub use types::{BoxFuture, RemoteAddr, Request, Response, ResponseExt, TEXT_PLAIN_UTF8};
