//! A router with access logging under an installed subscriber.
//!
//! Kept in its own test binary: the global subscriber can be installed once
//! per process.

use ariadne::prelude::*;
use ariadne::telemetry::{LogFormat, TelemetryError};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};

#[tokio::test]
async fn test_logged_request_with_telemetry_installed() {
    let config = TelemetryConfig::builder()
        .service_name("bookstore")
        .log_level("debug")
        .build();
    assert!(!config.metrics.enabled);
    assert_eq!(config.logging.format, LogFormat::Json);

    let telemetry = init_telemetry(&config).unwrap();
    assert!(telemetry.metrics().is_none());

    let router = Router::new();
    router
        .use_middleware(Logger::with_config(LoggerConfig {
            slow_request_threshold_ms: Some(0),
            ..LoggerConfig::default()
        }))
        .get("/books/{id}", |req: Request| async move {
            let id = req.param("id").unwrap_or_default().to_string();
            Response::text(StatusCode::OK, format!("book {id}"))
        });

    let request = http::Request::builder()
        .uri("/books/7?expand=author")
        .header("x-forwarded-for", "203.0.113.7")
        .body(Full::new(Bytes::new()))
        .unwrap();
    let response = router.serve_http(request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, "book 7");

    let missing = http::Request::builder()
        .uri("/nothing")
        .body(Full::new(Bytes::new()))
        .unwrap();
    assert_eq!(router.serve_http(missing).await.status(), StatusCode::NOT_FOUND);

    let err = init_telemetry(&config).unwrap_err();
    assert!(matches!(err, TelemetryError::LoggingInit(_)));
}
