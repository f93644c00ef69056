//! Common types used by handlers and middleware.
//!
//! Requests reach handlers with their body already collected, so both sides
//! of the exchange use a `Full<Bytes>` body.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::Full;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;

/// The HTTP request type seen by handlers and middleware.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type produced by handlers and middleware.
pub type Response = http::Response<Full<Bytes>>;

/// A boxed future that returns a response.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Content type of plain-text responses.
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Peer address of the connection a request arrived on.
///
/// Inserted into request extensions by the server integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub SocketAddr);

/// Extension trait for building responses without a fallible builder.
pub trait ResponseExt {
    /// Creates a plain-text response with the given status code.
    fn text(status: StatusCode, body: impl Into<Bytes>) -> Response;

    /// Creates a plain-text error response.
    fn error(status: StatusCode, message: &str) -> Response;

    /// Creates a JSON error response.
    fn json_error(status: StatusCode, code: &str, message: &str) -> Response;
}

impl ResponseExt for Response {
    fn text(status: StatusCode, body: impl Into<Bytes>) -> Response {
        let mut response = http::Response::new(Full::new(body.into()));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN_UTF8));
        response
    }

    fn error(status: StatusCode, message: &str) -> Response {
        Self::text(status, message.to_string())
    }

    fn json_error(status: StatusCode, code: &str, message: &str) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": code,
                "message": message
            }
        });

        let mut response = http::Response::new(Full::new(Bytes::from(body.to_string())));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
