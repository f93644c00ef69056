//! Core middleware trait and types.
//!
//! A [`Middleware`] wraps the rest of the pipeline: it receives the request
//! and a [`Next`] handle, may do work before and after calling `next.run()`,
//! or may return its own response without calling it at all.
//!
//! # Example
//!
//! ```
//! use ariadne_middleware::{BoxFuture, Middleware, Next, Request, Response};
//!
//! struct ServerHeader;
//!
//! impl Middleware for ServerHeader {
//!     fn name(&self) -> &'static str {
//!         "server-header"
//!     }
//!
//!     fn process(&self, request: Request, next: Next) -> BoxFuture<'static, Response> {
//!         Box::pin(async move {
//!             let mut response = next.run(request).await;
//!             response
//!                 .headers_mut()
//!                 .insert("server", http::HeaderValue::from_static("ariadne"));
//!             response
//!         })
//!     }
//! }
//! ```

use crate::handler::Endpoint;
use crate::types::{BoxFuture, Request, Response};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// The core middleware trait.
///
/// # Invariants
///
/// - Middleware calls `next.run()` at most once
/// - Not calling it short-circuits everything downstream, including the handler
pub trait Middleware: Send + Sync + 'static {
    /// Returns the name of this middleware, used in logs.
    fn name(&self) -> &'static str;

    /// Processes the request, delegating downstream through `next`.
    fn process(&self, request: Request, next: Next) -> BoxFuture<'static, Response>;
}

/// Handle to the remainder of the pipeline.
///
/// Consumed by [`Next::run`] so it can only be invoked once.
#[derive(Clone)]
pub struct Next {
    endpoint: Endpoint,
}

impl Next {
    /// Wraps the downstream endpoint.
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Invokes the next middleware or the handler.
    pub async fn run(self, request: Request) -> Response {
        (self.endpoint)(request).await
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// A middleware built from an async function.
///
/// # Example
///
/// ```
/// use ariadne_middleware::{FnMiddleware, Next, Request};
/// use std::time::Instant;
///
/// let timing = FnMiddleware::new("timing", |req: Request, next: Next| async move {
///     let start = Instant::now();
///     let response = next.run(req).await;
///     tracing::debug!(elapsed = ?start.elapsed(), "downstream finished");
///     response
/// });
/// ```
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a new function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn process(&self, request: Request, next: Next) -> BoxFuture<'static, Response> {
        Box::pin((self.func)(request, next))
    }
}

/// Wraps `next` in `middleware`, producing a new endpoint.
pub fn wrap(middleware: Arc<dyn Middleware>, next: Endpoint) -> Endpoint {
    Arc::new(move |request: Request| middleware.process(request, Next::new(Arc::clone(&next))))
}
