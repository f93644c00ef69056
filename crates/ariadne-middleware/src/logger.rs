//! Access-log middleware.
//!
//! [`Logger`] times everything downstream of it and emits one `tracing`
//! event per request on the [`fields::ACCESS_TARGET`] target. The status comes from
//! the request's [`ResponseRecorder`] when the router attached one, falling
//! back to the response itself.
//!
//! # Event Fields
//!
//! Names are listed in [`fields::ACCESS`].
//!
//! | Field | Source |
//! |-------|--------|
//! | `latency_ms` | wall time around `next.run()` |
//! | `http.protocol` | request version |
//! | `http.status_code` | recorder, else response |
//! | `http.request_content_type` | `Content-Type`, default `text/plain` |
//! | `http.request_content_encoding` | `Content-Encoding`, default `identity` |
//! | `http.response_content_type` | `Content-Type`, default `text/plain` |
//! | `http.response_content_encoding` | `Content-Encoding`, default `identity` |
//! | `client.ip` | `X-Forwarded-For`, `X-Real-IP`, peer address |
//! | `http.method`, `http.path`, `http.query` | request URI |

use crate::context::RequestExt;
use crate::middleware::{Middleware, Next};
use crate::recorder::ResponseRecorder;
use crate::types::{BoxFuture, Request, Response};
use ariadne_telemetry::logging::fields;
use http::header::{HeaderMap, HeaderName, CONTENT_ENCODING, CONTENT_TYPE};
use http::{Method, StatusCode, Version};
use serde::Deserialize;
use std::time::{Duration, Instant};

const DEFAULT_CONTENT_TYPE: &str = "text/plain";
const DEFAULT_CONTENT_ENCODING: &str = "identity";

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
static X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Configuration for the [`Logger`] middleware.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Record request count and latency through the `metrics` facade.
    pub record_metrics: bool,

    /// Include the raw query string in access events.
    pub include_query: bool,

    /// Requests at or above this latency are logged at `WARN`.
    pub slow_request_threshold_ms: Option<u64>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            record_metrics: true,
            include_query: true,
            slow_request_threshold_ms: None,
        }
    }
}

/// Middleware that logs one access event per request.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    /// Creates a logger with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logger with the given configuration.
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// The logger's configuration.
    #[must_use]
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }
}

impl Middleware for Logger {
    fn name(&self) -> &'static str {
        "logger"
    }

    fn process(&self, request: Request, next: Next) -> BoxFuture<'static, Response> {
        let config = self.config.clone();

        Box::pin(async move {
            let start = Instant::now();
            let access = AccessRecord::from_request(&request, config.include_query);
            let recorder = request.recorder().cloned();

            let response = next.run(request).await;

            let latency = start.elapsed();
            let status = resolve_status(recorder.as_ref(), &response);
            access.emit(status, response.headers(), latency, &config);

            if config.record_metrics {
                ariadne_telemetry::record_request(
                    access.method.as_str(),
                    status.as_u16(),
                    latency,
                );
            }

            response
        })
    }
}

fn resolve_status(recorder: Option<&ResponseRecorder>, response: &Response) -> StatusCode {
    recorder
        .and_then(ResponseRecorder::status)
        .unwrap_or_else(|| response.status())
}

/// Request-side fields, captured before the request is handed downstream.
#[derive(Debug)]
struct AccessRecord {
    method: Method,
    path: String,
    query: Option<String>,
    version: Version,
    client_ip: String,
    content_type: String,
    content_encoding: String,
}

impl AccessRecord {
    fn from_request(request: &Request, include_query: bool) -> Self {
        let headers = request.headers();
        Self {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            query: include_query
                .then(|| request.uri().query().map(str::to_string))
                .flatten(),
            version: request.version(),
            client_ip: client_ip(request),
            content_type: header_or(headers, &CONTENT_TYPE, DEFAULT_CONTENT_TYPE),
            content_encoding: header_or(headers, &CONTENT_ENCODING, DEFAULT_CONTENT_ENCODING),
        }
    }

    fn emit(
        &self,
        status: StatusCode,
        response_headers: &HeaderMap,
        latency: Duration,
        config: &LoggerConfig,
    ) {
        let latency_ms = latency.as_secs_f64() * 1000.0;
        let response_content_type =
            header_or(response_headers, &CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
        let response_content_encoding =
            header_or(response_headers, &CONTENT_ENCODING, DEFAULT_CONTENT_ENCODING);
        let query = self.query.as_deref().unwrap_or("");

        let slow = config
            .slow_request_threshold_ms
            .is_some_and(|threshold| latency >= Duration::from_millis(threshold));
        let record = self;

        macro_rules! access_event {
            ($level:ident, $message:literal) => {
                tracing::$level!(
                    target: fields::ACCESS_TARGET,
                    latency_ms = latency_ms,
                    http.protocol = ?record.version,
                    http.status_code = status.as_u16(),
                    http.request_content_type = %record.content_type,
                    http.request_content_encoding = %record.content_encoding,
                    http.response_content_type = %response_content_type,
                    http.response_content_encoding = %response_content_encoding,
                    client.ip = %record.client_ip,
                    http.method = %record.method,
                    http.path = %record.path,
                    http.query = %query,
                    $message
                )
            };
        }

        if slow {
            access_event!(warn, "slow request");
        } else {
            access_event!(info, "request");
        }
    }
}

/// Client address chain: forwarded-for, real-ip, then the peer address.
fn client_ip(request: &Request) -> String {
    let headers = request.headers();
    let peer = request.remote_addr().map(|addr| addr.ip().to_string());

    [
        header_str(headers, &X_FORWARDED_FOR).map(str::to_string),
        header_str(headers, &X_REAL_IP).map(str::to_string),
        peer,
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn header_or(headers: &HeaderMap, name: &HeaderName, default: &str) -> String {
    header_str(headers, name)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Endpoint;
    use crate::types::{RemoteAddr, ResponseExt};
    use bytes::Bytes;
    use http_body_util::Full;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    #[derive(Debug)]
    struct CapturedEvent {
        target: String,
        level: Level,
        fields: Vec<(String, String)>,
    }

    impl CapturedEvent {
        fn field(&self, name: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<CapturedEvent>>>);

    struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

    impl Visit for FieldVisitor<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.push((field.name().to_string(), format!("{value:?}")));
        }
    }

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Vec::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.0.lock().unwrap().push(CapturedEvent {
                target: event.metadata().target().to_string(),
                level: *event.metadata().level(),
                fields,
            });
        }
    }

    impl Capture {
        fn access_events(&self) -> Vec<CapturedEvent> {
            std::mem::take(&mut *self.0.lock().unwrap())
                .into_iter()
                .filter(|event| event.target == fields::ACCESS_TARGET)
                .collect()
        }
    }

    fn request() -> http::request::Builder {
        http::Request::builder().uri("/books/3?expand=author")
    }

    fn endpoint(status: StatusCode) -> Endpoint {
        Arc::new(move |_req: Request| -> BoxFuture<'static, Response> {
            Box::pin(async move { Response::text(status, "body") })
        })
    }

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert!(config.record_metrics);
        assert!(config.include_query);
        assert_eq!(config.slow_request_threshold_ms, None);
        assert_eq!(Logger::new().name(), "logger");
    }

    #[test]
    fn test_config_deserialize() {
        let config: LoggerConfig = serde_json::from_str(
            r#"{"include_query": false, "slow_request_threshold_ms": 250}"#,
        )
        .unwrap();
        assert!(config.record_metrics);
        assert!(!config.include_query);
        assert_eq!(config.slow_request_threshold_ms, Some(250));
    }

    #[test]
    fn test_client_ip_chain() {
        let mut req = request()
            .header("x-forwarded-for", "203.0.113.7")
            .header("x-real-ip", "198.51.100.2")
            .body(Full::new(Bytes::new()))
            .unwrap();
        req.extensions_mut()
            .insert(RemoteAddr("192.0.2.1:5555".parse().unwrap()));

        assert_eq!(client_ip(&req), "203.0.113.7, 198.51.100.2, 192.0.2.1");
    }

    #[test]
    fn test_client_ip_peer_only() {
        let mut req = request().body(Full::new(Bytes::new())).unwrap();
        req.extensions_mut()
            .insert(RemoteAddr("[::1]:8080".parse().unwrap()));

        assert_eq!(client_ip(&req), "::1");
    }

    #[test]
    fn test_access_record_defaults() {
        let req = request().body(Full::new(Bytes::new())).unwrap();
        let record = AccessRecord::from_request(&req, true);

        assert_eq!(record.path, "/books/3");
        assert_eq!(record.query.as_deref(), Some("expand=author"));
        assert_eq!(record.content_type, "text/plain");
        assert_eq!(record.content_encoding, "identity");
        assert_eq!(record.client_ip, "");

        let record = AccessRecord::from_request(&req, false);
        assert_eq!(record.query, None);
    }

    #[test]
    fn test_status_prefers_recorder() {
        let response = Response::text(StatusCode::OK, "");
        let recorder = ResponseRecorder::new();
        assert_eq!(resolve_status(Some(&recorder), &response), StatusCode::OK);

        recorder.write_header(StatusCode::CREATED);
        assert_eq!(resolve_status(Some(&recorder), &response), StatusCode::CREATED);
        assert_eq!(resolve_status(None, &response), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logger_passes_response_through() {
        let logger = Logger::with_config(LoggerConfig {
            slow_request_threshold_ms: Some(0),
            ..LoggerConfig::default()
        });
        let req = request().body(Full::new(Bytes::new())).unwrap();

        let response = logger
            .process(req, Next::new(endpoint(StatusCode::IM_A_TEAPOT)))
            .await;
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_access_event_fields() {
        let capture = Capture::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));

        let mut req = request()
            .header("x-real-ip", "198.51.100.2")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let recorder = ResponseRecorder::new();
        recorder.write_header(StatusCode::CREATED);
        recorder.attach(req.extensions_mut());

        let response = Logger::new()
            .process(req, Next::new(endpoint(StatusCode::OK)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let events = capture.access_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.level, Level::INFO);

        let mut names: Vec<&str> = event.fields.iter().map(|(k, _)| k.as_str()).collect();
        let mut expected = fields::ACCESS.to_vec();
        names.sort_unstable();
        expected.sort_unstable();
        assert_eq!(names, expected);

        assert_eq!(event.field(fields::HTTP_STATUS_CODE), Some("201"));
        assert_eq!(event.field(fields::HTTP_METHOD), Some("GET"));
        assert_eq!(event.field(fields::HTTP_PATH), Some("/books/3"));
        assert_eq!(event.field(fields::HTTP_QUERY), Some("expand=author"));
        assert_eq!(event.field(fields::CLIENT_IP), Some("198.51.100.2"));
        assert_eq!(
            event.field(fields::HTTP_REQUEST_CONTENT_TYPE),
            Some("application/json")
        );
        assert_eq!(
            event.field(fields::HTTP_RESPONSE_CONTENT_TYPE),
            Some("text/plain; charset=utf-8")
        );
        assert_eq!(event.field(fields::HTTP_RESPONSE_CONTENT_ENCODING), Some("identity"));
        assert_eq!(event.field("message"), Some("request"));
    }

    #[tokio::test]
    async fn test_slow_request_logs_at_warn() {
        let capture = Capture::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));

        let logger = Logger::with_config(LoggerConfig {
            slow_request_threshold_ms: Some(0),
            record_metrics: false,
            ..LoggerConfig::default()
        });
        let req = request().body(Full::new(Bytes::new())).unwrap();
        logger
            .process(req, Next::new(endpoint(StatusCode::ACCEPTED)))
            .await;

        let events = capture.access_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].field("message"), Some("slow request"));
        assert_eq!(events[0].field(fields::HTTP_STATUS_CODE), Some("202"));
    }
}
