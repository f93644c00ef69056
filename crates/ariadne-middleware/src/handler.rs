//! Request handlers.
//!
//! Any `Fn(Request) -> impl Future<Output = Response>` closure or async fn is
//! a [`Handler`]; types that need state can implement the trait directly.

use crate::types::{BoxFuture, Request, Response, ResponseExt};
use http::StatusCode;
use std::future::Future;
use std::sync::Arc;

/// Body of the default not-found response.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Something that turns a request into a response.
pub trait Handler: Send + Sync + 'static {
    /// Serves one request.
    fn call(&self, request: Request) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request) -> BoxFuture<'static, Response> {
        Box::pin(self(request))
    }
}

/// A shared, type-erased handler.
pub type BoxedHandler = Arc<dyn Handler>;

/// A composed request pipeline: middleware wrapped around a terminal handler.
pub type Endpoint = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Erases a handler's type.
pub fn boxed<H: Handler>(handler: H) -> BoxedHandler {
    Arc::new(handler)
}

/// Turns a shared handler into an [`Endpoint`].
pub fn endpoint(handler: BoxedHandler) -> Endpoint {
    Arc::new(move |request: Request| handler.call(request))
}

/// Responds `404` with a plain-text body.
pub async fn not_found(_request: Request) -> Response {
    Response::text(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TEXT_PLAIN_UTF8;
    use bytes::Bytes;
    use http_body_util::{BodyExt, Full};

    fn request(path: &str) -> Request {
        http::Request::builder()
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    struct Greeter {
        greeting: &'static str,
    }

    impl Handler for Greeter {
        fn call(&self, _request: Request) -> BoxFuture<'static, Response> {
            let greeting = self.greeting;
            Box::pin(async move { Response::text(StatusCode::OK, greeting) })
        }
    }

    #[tokio::test]
    async fn test_closure_handler() {
        let handler = boxed(|req: Request| async move {
            Response::text(StatusCode::OK, req.uri().path().to_string())
        });

        let response = handler.call(request("/echo")).await;
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "/echo");
    }

    #[tokio::test]
    async fn test_struct_handler() {
        let handler = endpoint(boxed(Greeter { greeting: "hello" }));

        let response = handler(request("/")).await;
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "hello");
    }

    #[test]
    fn test_not_found() {
        let response = tokio_test::block_on(not_found(request("/missing")));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            TEXT_PLAIN_UTF8
        );

        let body = tokio_test::block_on(response.into_body().collect())
            .unwrap()
            .to_bytes();
        assert_eq!(body, NOT_FOUND_BODY);
    }
}
