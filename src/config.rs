use std::net::SocketAddr;

use crate::diagnostics::Diagnostics;
use crate::env::*;
use crate::error::ConfigError;
use crate::init::LogFormat;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BINDER_DSN: &str = "memory://";
pub const DEFAULT_DESTINATION: &str = "logs";
pub const DEFAULT_CONSUMER_GROUP: &str = "logging-svc";

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub http_addr: SocketAddr,
    pub binder_dsn: String,
    /// Destination for the `logProducer-out-0` binding.
    pub producer_destination: String,
    /// Destination for the `logConsumer-in-0` binding.
    pub consumer_destination: String,
    pub consumer_group: String,
    pub diagnostics: Diagnostics,
    pub log_format: LogFormat,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup, falling back to defaults
    /// for every missing key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let http_addr_raw = get(LOGGING_SVC_HTTP_ADDR_ENV, DEFAULT_HTTP_ADDR);
        let http_addr = http_addr_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: LOGGING_SVC_HTTP_ADDR_ENV,
                value: http_addr_raw.clone(),
            })?;

        let diagnostics_raw = get(LOGGING_SVC_DIAGNOSTICS_ENV, "tracing");
        let diagnostics = diagnostics_raw
            .parse::<Diagnostics>()
            .map_err(|value| ConfigError::Invalid {
                name: LOGGING_SVC_DIAGNOSTICS_ENV,
                value,
            })?;

        let log_format_raw = get(RUST_LOG_FORMAT_ENV, "json");
        let log_format = log_format_raw
            .parse::<LogFormat>()
            .map_err(|value| ConfigError::Invalid {
                name: RUST_LOG_FORMAT_ENV,
                value,
            })?;

        let settings = Settings {
            http_addr,
            binder_dsn: get(LOGGING_SVC_BINDER_DSN_ENV, DEFAULT_BINDER_DSN),
            producer_destination: get(LOGGING_SVC_PRODUCER_DESTINATION_ENV, DEFAULT_DESTINATION),
            consumer_destination: get(LOGGING_SVC_CONSUMER_DESTINATION_ENV, DEFAULT_DESTINATION),
            consumer_group: get(LOGGING_SVC_CONSUMER_GROUP_ENV, DEFAULT_CONSUMER_GROUP),
            diagnostics,
            log_format,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_non_empty(LOGGING_SVC_BINDER_DSN_ENV, &self.binder_dsn)?;
        validate_non_empty(LOGGING_SVC_PRODUCER_DESTINATION_ENV, &self.producer_destination)?;
        validate_non_empty(LOGGING_SVC_CONSUMER_DESTINATION_ENV, &self.consumer_destination)?;
        validate_non_empty(LOGGING_SVC_CONSUMER_GROUP_ENV, &self.consumer_group)?;
        Ok(())
    }
}

fn validate_non_empty(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { name });
    }
    Ok(())
}
