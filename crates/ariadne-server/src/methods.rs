//! Per-method registration shortcuts.

use crate::router::Router;
use ariadne_middleware::Handler;
use http::Method;

macro_rules! method_routes {
    ($($(#[$doc:meta])* $name:ident => $method:ident;)*) => {
        impl Router {
            $(
                $(#[$doc])*
                pub fn $name<H: Handler>(&self, pattern: &str, handler: H) -> &Self {
                    self.handle_method(&Method::$method, pattern, handler)
                }
            )*
        }
    };
}

method_routes! {
    /// Registers a `GET` route.
    get => GET;
    /// Registers a `POST` route.
    post => POST;
    /// Registers a `PUT` route.
    put => PUT;
    /// Registers a `PATCH` route.
    patch => PATCH;
    /// Registers a `DELETE` route.
    delete => DELETE;
    /// Registers a `HEAD` route.
    head => HEAD;
    /// Registers an `OPTIONS` route.
    options => OPTIONS;
    /// Registers a `TRACE` route.
    trace => TRACE;
    /// Registers a `CONNECT` route.
    connect => CONNECT;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_middleware::{Request, Response, ResponseExt};
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::Full;

    #[tokio::test]
    async fn test_every_shortcut_registers_its_method() {
        let router = Router::new();
        let ok = |_req: Request| async { Response::text(StatusCode::OK, "") };

        router
            .get("/r", ok)
            .post("/r", ok)
            .put("/r", ok)
            .patch("/r", ok)
            .delete("/r", ok)
            .head("/r", ok)
            .options("/r", ok)
            .trace("/r", ok)
            .connect("/r", ok);
        assert_eq!(router.len(), 9);

        for method in [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
            Method::TRACE,
            Method::CONNECT,
        ] {
            let request = http::Request::builder()
                .method(method.clone())
                .uri("/r")
                .body(Full::new(Bytes::new()))
                .unwrap();
            let response = router.serve_http(request).await;
            assert_eq!(response.status(), StatusCode::OK, "{method}");
        }
    }
}
