//! Logging and metrics setup for Ariadne.
//!
//! - **Logging**: structured JSON or pretty output via `tracing-subscriber`
//! - **Metrics**: Prometheus-format metrics via the `metrics` crate
//!
//! The router and middleware crates only emit `tracing` events and `metrics`
//! observations. Nothing is rendered or exported until an application calls
//! [`init_telemetry`] (or the individual `init_*` functions).
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `ariadne_requests_total` | Counter | `method`, `status` | Total request count |
//! | `ariadne_request_duration_seconds` | Histogram | `method` | Request latency |
//!
//! # Example
//!
//! ```rust,ignore
//! use ariadne_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TelemetryConfig::builder()
//!         .service_name("bookstore")
//!         .metrics_addr("0.0.0.0:9090")
//!         .build()
//!         .with_env_overrides()?;
//!
//!     let _telemetry = init_telemetry(&config)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{fields, init_logging, LogConfig, LogFormat};
pub use metrics::{init_metrics, record_request, render_metrics, MetricsConfig, MetricsRegistry};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// What [`init_telemetry`] installed.
#[derive(Debug, Default)]
pub struct Telemetry {
    metrics: Option<MetricsRegistry>,
}

impl Telemetry {
    /// The installed metrics registry, when metrics are enabled.
    #[must_use]
    pub fn metrics(&self) -> Option<&MetricsRegistry> {
        self.metrics.as_ref()
    }
}

/// Initializes logging, then metrics.
///
/// Metrics installation spawns the scrape listener, so call this from within
/// a Tokio runtime when metrics are enabled.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<Telemetry> {
    init_logging(&config.logging)?;
    let metrics = init_metrics(&config.metrics)?;
    Ok(Telemetry { metrics })
}
