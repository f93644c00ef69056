//! Hyper integration.
//!
//! [`RouterService`] adapts a [`Router`] to `hyper`'s [`Service`] trait: it
//! collects the incoming body, records the peer address and hands the
//! request to [`Router::serve_http`]. Connection upgrades stay available to
//! handlers through [`hijack`].
//!
//! ```rust,ignore
//! let (stream, remote_addr) = listener.accept().await?;
//! tokio::spawn(ariadne_server::serve_connection(router.clone(), stream, remote_addr));
//! ```

use crate::error::ServerError;
use crate::router::Router;
use ariadne_middleware::{BoxFuture, RemoteAddr, Request, Response, ResponseExt};
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper::upgrade::OnUpgrade;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpStream;

/// A [`Router`] bound to one connection.
#[derive(Debug, Clone)]
pub struct RouterService {
    router: Router,
    remote_addr: Option<SocketAddr>,
}

impl RouterService {
    /// Wraps a router.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            router,
            remote_addr: None,
        }
    }

    /// Records the peer address on every request served.
    #[must_use]
    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }
}

impl Service<http::Request<Incoming>> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn call(&self, request: http::Request<Incoming>) -> Self::Future {
        let router = self.router.clone();
        let remote_addr = self.remote_addr;

        Box::pin(async move {
            let (mut parts, body) = request.into_parts();
            let body = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    let err = ServerError::Body(e);
                    tracing::warn!(error = %err, "rejecting request");
                    return Ok(Response::error(StatusCode::BAD_REQUEST, &err.to_string()));
                }
            };

            if let Some(addr) = remote_addr {
                parts.extensions.insert(RemoteAddr(addr));
            }

            let request = Request::from_parts(parts, Full::new(body));
            Ok(router.serve_http(request).await)
        })
    }
}

/// Serves HTTP/1 requests on `stream` until the peer closes it.
///
/// Upgrades are enabled, so a handler that [`hijack`]s the request receives
/// the raw connection once its `101 Switching Protocols` response is sent.
pub async fn serve_connection(
    router: Router,
    stream: TcpStream,
    remote_addr: SocketAddr,
) -> Result<(), ServerError> {
    let service = RouterService::new(router).with_remote_addr(remote_addr);

    http1::Builder::new()
        .serve_connection(TokioIo::new(stream), service)
        .with_upgrades()
        .await
        .map_err(|e| {
            tracing::debug!(%remote_addr, error = %e, "connection closed with error");
            ServerError::Connection(e)
        })
}

/// Takes over the request's connection.
///
/// Returns `None` when the connection does not support upgrades or it was
/// already taken. The returned future resolves to the raw I/O after the
/// handler's response (normally `101 Switching Protocols`) has been written.
pub fn hijack(request: &mut Request) -> Option<OnUpgrade> {
    request.extensions_mut().remove::<OnUpgrade>()
}
