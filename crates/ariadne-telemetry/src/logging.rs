//! Structured logging for Ariadne.
//!
//! The router emits dispatch events under its crate targets and the
//! access-log middleware emits one event per request under
//! [`fields::ACCESS_TARGET`]. This module installs the subscriber that
//! renders both.
//!
//! ```rust,ignore
//! use ariadne_telemetry::logging::{init_logging, LogConfig, LogFormat};
//!
//! init_logging(&LogConfig { format: LogFormat::Pretty, ..LogConfig::default() })?;
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// How log records are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line human-readable output.
    #[serde(alias = "text")]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(TelemetryError::InvalidConfig(format!(
                "log format must be `json` or `pretty`, got `{other}`"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Whether a subscriber is installed at all.
    pub enabled: bool,

    /// Filter directive (e.g. `"info"`, `"ariadne_server=debug,hyper=warn"`).
    pub level: String,

    /// Output format.
    pub format: LogFormat,

    /// Whether access events from the `Logger` middleware are rendered.
    pub access_log: bool,

    /// Whether records carry source file and line.
    pub file_line_info: bool,

    /// Service name stamped on the startup record.
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            format: LogFormat::Json,
            access_log: true,
            file_line_info: false,
            service_name: "ariadne".to_string(),
        }
    }
}

impl LogConfig {
    /// The filter directive actually installed.
    ///
    /// Disabling the access log appends `ariadne::access=off`, which
    /// overrides whatever `level` says about that target.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        if self.access_log {
            self.level.clone()
        } else if self.level.trim().is_empty() {
            format!("{}=off", fields::ACCESS_TARGET)
        } else {
            format!("{},{}=off", self.level, fields::ACCESS_TARGET)
        }
    }
}

/// Initializes the global logging subscriber.
///
/// A second call fails with [`TelemetryError::LoggingInit`] because only one
/// global subscriber may be installed per process.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let directive = config.filter_directive();
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| TelemetryError::LoggingInit(format!("invalid filter `{directive}`: {e}")))?;

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        format = %config.format,
        filter = %directive,
        "logging initialized"
    );
    Ok(())
}

/// Target and field names of the access event.
pub mod fields {
    /// Target of the access event.
    pub const ACCESS_TARGET: &str = "ariadne::access";

    /// Wall time around the downstream chain, in milliseconds.
    pub const LATENCY_MS: &str = "latency_ms";

    /// Protocol version.
    pub const HTTP_PROTOCOL: &str = "http.protocol";

    /// Response status code.
    pub const HTTP_STATUS_CODE: &str = "http.status_code";

    /// Request `Content-Type`.
    pub const HTTP_REQUEST_CONTENT_TYPE: &str = "http.request_content_type";

    /// Request `Content-Encoding`.
    pub const HTTP_REQUEST_CONTENT_ENCODING: &str = "http.request_content_encoding";

    /// Response `Content-Type`.
    pub const HTTP_RESPONSE_CONTENT_TYPE: &str = "http.response_content_type";

    /// Response `Content-Encoding`.
    pub const HTTP_RESPONSE_CONTENT_ENCODING: &str = "http.response_content_encoding";

    /// Forwarded-for, real-ip and peer address, comma separated.
    pub const CLIENT_IP: &str = "client.ip";

    /// Request method.
    pub const HTTP_METHOD: &str = "http.method";

    /// Request path.
    pub const HTTP_PATH: &str = "http.path";

    /// Raw query string.
    pub const HTTP_QUERY: &str = "http.query";

    /// Every field of the access event, including its message.
    pub const ACCESS: [&str; 12] = [
        LATENCY_MS,
        HTTP_PROTOCOL,
        HTTP_STATUS_CODE,
        HTTP_REQUEST_CONTENT_TYPE,
        HTTP_REQUEST_CONTENT_ENCODING,
        HTTP_RESPONSE_CONTENT_TYPE,
        HTTP_RESPONSE_CONTENT_ENCODING,
        CLIENT_IP,
        HTTP_METHOD,
        HTTP_PATH,
        HTTP_QUERY,
        "message",
    ];
}
