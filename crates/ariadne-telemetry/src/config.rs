//! Telemetry configuration.
//!
//! Configuration resolves in three layers: defaults, an optional TOML
//! document, then `ARIADNE_*` environment overrides.
//!
//! ```toml
//! service_name = "bookstore"
//!
//! [logging]
//! level = "info,ariadne_server=debug"
//! format = "json"
//! access_log = true
//!
//! [metrics]
//! enabled = true
//! addr = "0.0.0.0:9090"
//! ```

use crate::error::TelemetryError;
use crate::logging::{LogConfig, LogFormat};
use crate::metrics::MetricsConfig;
use crate::TelemetryResult;
use serde::Deserialize;

/// Overrides the log filter directive.
pub const ENV_LOG: &str = "ARIADNE_LOG";

/// Selects `json` or `pretty` log output.
pub const ENV_LOG_FORMAT: &str = "ARIADNE_LOG_FORMAT";

/// Enables metrics and sets the scrape listener address.
pub const ENV_METRICS_ADDR: &str = "ARIADNE_METRICS_ADDR";

/// Configuration for all telemetry subsystems.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Service name (used in metrics labels and logs).
    pub service_name: String,

    /// Logging configuration.
    pub logging: LogConfig,

    /// Metrics configuration.
    pub metrics: MetricsConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "ariadne-service".to_string(),
            logging: LogConfig::default(),
            metrics: MetricsConfig::default(),
        }
        .propagate_service_name()
    }
}

impl TelemetryConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::new()
    }

    /// Parses a TOML document; omitted fields keep their defaults.
    pub fn from_toml_str(content: &str) -> TelemetryResult<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config.propagate_service_name())
    }

    /// Default configuration with `ARIADNE_*` environment overrides applied.
    pub fn from_env() -> TelemetryResult<Self> {
        Self::default().with_env_overrides()
    }

    /// Applies `ARIADNE_*` environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> TelemetryResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    pub fn apply_overrides<F>(mut self, lookup: F) -> TelemetryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level;
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format.parse::<LogFormat>().map_err(|e| {
                TelemetryError::InvalidConfig(format!("{ENV_LOG_FORMAT}: {e}"))
            })?;
        }

        if let Some(addr) = lookup(ENV_METRICS_ADDR) {
            self.metrics.enabled = true;
            self.metrics.addr = addr;
        }

        Ok(self)
    }

    fn propagate_service_name(mut self) -> Self {
        self.logging.service_name = self.service_name.clone();
        self.metrics.service_name = self.service_name.clone();
        self
    }
}

/// Builder for [`TelemetryConfig`].
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    service_name: Option<String>,
    logging: Option<LogConfig>,
    metrics: Option<MetricsConfig>,
}

impl TelemetryConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: &str) -> Self {
        self.service_name = Some(name.to_string());
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn logging(mut self, config: LogConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// Sets the metrics configuration.
    #[must_use]
    pub fn metrics(mut self, config: MetricsConfig) -> Self {
        self.metrics = Some(config);
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn log_level(mut self, level: &str) -> Self {
        let config = self.logging.take().unwrap_or_default();
        self.logging = Some(LogConfig {
            level: level.to_string(),
            ..config
        });
        self
    }

    /// Enables metrics and sets the scrape endpoint address.
    #[must_use]
    pub fn metrics_addr(mut self, addr: &str) -> Self {
        let config = self.metrics.take().unwrap_or_default();
        self.metrics = Some(MetricsConfig {
            enabled: true,
            addr: addr.to_string(),
            ..config
        });
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> TelemetryConfig {
        let defaults = TelemetryConfig::default();

        TelemetryConfig {
            service_name: self.service_name.unwrap_or(defaults.service_name),
            logging: self.logging.unwrap_or(defaults.logging),
            metrics: self.metrics.unwrap_or(defaults.metrics),
        }
        .propagate_service_name()
    }
}
