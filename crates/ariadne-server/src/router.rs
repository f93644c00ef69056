//! The request router.
//!
//! A [`Router`] owns one sorted routing table, an ordered middleware list and
//! a not-found handler, all behind a single reader/writer lock:
//!
//! - registration (`handle_method`, `use_middleware`, `not_found`) takes the
//!   write lock
//! - dispatch takes the read lock only long enough to resolve a handler,
//!   then releases it before the handler runs
//!
//! The middleware chain is recompiled whenever middleware is added, so
//! dispatch never rebuilds it.
//!
//! # Example
//!
//! ```rust
//! use ariadne_middleware::{Request, RequestExt, Response, ResponseExt};
//! use ariadne_server::Router;
//! use http::StatusCode;
//!
//! let router = Router::new();
//! router
//!     .get("/health", |_req: Request| async { Response::text(StatusCode::OK, "OK") })
//!     .get("/books/{id}", |req: Request| async move {
//!         let id = req.param("id").unwrap_or_default().to_string();
//!         Response::text(StatusCode::OK, id)
//!     });
//!
//! assert_eq!(router.len(), 2);
//! ```

use ariadne_middleware::{
    boxed, endpoint, BoxFuture, BoxedHandler, Endpoint, Handler, Middleware, Middlewares,
    Request, Response, ResponseExt, ResponseRecorder,
};
use ariadne_router::{any_method_key, route_key, Pattern, Register, RouteError, ANY_METHOD};
use bytes::Bytes;
use http::header::{HeaderValue, CONNECTION};
use http::{Method, StatusCode, Version};
use http_body_util::Full;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// Everything a router guards with its lock.
struct RouterState {
    register: Register<BoxedHandler>,
    middlewares: Middlewares,
    not_found: BoxedHandler,
    pipeline: Endpoint,
}

/// An HTTP request router.
///
/// Cloning is cheap and clones share the same routes and middleware.
#[derive(Clone)]
pub struct Router {
    state: Arc<RwLock<RouterState>>,
}

impl Router {
    /// Creates a router with no routes, no middleware and the default
    /// not-found handler.
    #[must_use]
    pub fn new() -> Self {
        let state = Arc::new_cyclic(|weak| {
            RwLock::new(RouterState {
                register: Register::new(),
                middlewares: Middlewares::new(),
                not_found: boxed(ariadne_middleware::not_found),
                pipeline: terminal(weak.clone()),
            })
        });
        Self { state }
    }

    /// Registers `handler` for `method` requests matching `pattern`.
    pub fn handle_method<H: Handler>(&self, method: &Method, pattern: &str, handler: H) -> &Self {
        let key = route_key(method.as_str(), pattern);
        self.register(key, boxed(handler));
        self
    }

    /// Registers `handler` for requests of any method matching `pattern`.
    ///
    /// The method is bound as the `http_method` path parameter. Routes
    /// registered for a specific method take precedence.
    ///
    /// `http_method` is therefore reserved in these patterns: a
    /// `{http_method}` segment in `pattern` is bound after the method and
    /// replaces it in [`Params`](ariadne_router::Params), so the handler
    /// sees the path value and the method is only available from the
    /// request itself.
    pub fn handle<H: Handler>(&self, pattern: &str, handler: H) -> &Self {
        if Pattern::parse(pattern)
            .param_names()
            .any(|name| name == ANY_METHOD)
        {
            tracing::warn!(
                pattern,
                "`{{{ANY_METHOD}}}` in an any-method route shadows the method parameter"
            );
        }
        self.register(any_method_key(pattern), boxed(handler));
        self
    }

    fn register(&self, key: String, handler: BoxedHandler) {
        let mut state = self.state.write();
        let register = std::mem::take(&mut state.register);
        state.register = register.add(&key, handler);
        tracing::debug!(route = %key, routes = state.register.len(), "route registered");
    }

    /// Appends a middleware and recompiles the chain.
    ///
    /// The first middleware added is the outermost.
    pub fn use_middleware<M: Middleware>(&self, middleware: M) -> &Self {
        let name = middleware.name();
        let mut state = self.state.write();
        state.middlewares.push(middleware);
        state.pipeline = state.middlewares.chain(terminal(Arc::downgrade(&self.state)));
        tracing::debug!(middleware = name, chain = ?state.middlewares, "middleware added");
        self
    }

    /// Replaces the handler used when no route matches.
    pub fn not_found<H: Handler>(&self, handler: H) -> &Self {
        self.state.write().not_found = boxed(handler);
        self
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().register.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().register.is_empty()
    }

    /// Registered route keys in table order (e.g. `/GET/users/{id}`).
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.state
            .read()
            .register
            .iter()
            .map(|entry| entry.pattern().to_string())
            .collect()
    }

    /// Dispatches one request through the middleware chain.
    ///
    /// A fresh [`ResponseRecorder`] is attached to the request so middleware
    /// can read the status the handler produced.
    pub async fn serve_http(&self, mut request: Request) -> Response {
        let recorder = ResponseRecorder::new();
        recorder.attach(request.extensions_mut());

        let pipeline = Arc::clone(&self.state.read().pipeline);
        let response = pipeline(request).await;

        recorder.observe(&response);
        response
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Router")
            .field("routes", &state.register.len())
            .field("middlewares", &state.middlewares)
            .finish_non_exhaustive()
    }
}

/// The innermost endpoint of every chain.
///
/// Holds a weak reference so the compiled chain stored inside the state does
/// not keep that state alive.
fn terminal(state: Weak<RwLock<RouterState>>) -> Endpoint {
    Arc::new(move |request: Request| -> BoxFuture<'static, Response> {
        match state.upgrade() {
            Some(state) => serve(&state, request),
            None => Box::pin(async {
                Response::error(StatusCode::SERVICE_UNAVAILABLE, "router is shut down")
            }),
        }
    })
}

/// Resolves and invokes exactly one handler for `request`.
fn serve(state: &RwLock<RouterState>, mut request: Request) -> BoxFuture<'static, Response> {
    if request.uri().path() == "*" {
        let close = request.version() >= Version::HTTP_11;
        return Box::pin(async move { bad_request_for_asterisk(close) });
    }

    let key = route_key(request.method().as_str(), request.uri().path());
    let recorder = request.extensions().get::<ResponseRecorder>().cloned();

    let resolved = {
        let state = state.read();
        match state.register.find(&key) {
            Ok(found) => Ok((Arc::clone(found.handler()), found.params)),
            Err(RouteError::NotFound) => Err(Dispatch::NotFound(Arc::clone(&state.not_found))),
            Err(err) => Err(Dispatch::Failed(err.to_string())),
        }
    };

    let handler = match resolved {
        Ok((handler, params)) => {
            tracing::debug!(route = %key, params = params.len(), "route matched");
            params.attach(request.extensions_mut());
            endpoint(handler)
        }
        Err(Dispatch::NotFound(handler)) => {
            tracing::debug!(route = %key, "no route matched");
            endpoint(handler)
        }
        Err(Dispatch::Failed(message)) => {
            tracing::error!(route = %key, error = %message, "route resolution failed");
            let response = Response::error(StatusCode::INTERNAL_SERVER_ERROR, &message);
            return Box::pin(async move { response });
        }
    };

    Box::pin(async move {
        let response = handler(request).await;
        if let Some(recorder) = recorder {
            recorder.observe(&response);
        }
        response
    })
}

enum Dispatch {
    NotFound(BoxedHandler),
    Failed(String),
}

fn bad_request_for_asterisk(close: bool) -> Response {
    let mut response = http::Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::BAD_REQUEST;
    if close {
        response
            .headers_mut()
            .insert(CONNECTION, HeaderValue::from_static("close"));
    }
    response
}
