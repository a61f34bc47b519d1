//! Environment variable names read by
//! [`Settings::from_env`](crate::config::Settings::from_env).

/// HTTP bind address, e.g. `0.0.0.0:8080`.
pub const LOGGING_SVC_HTTP_ADDR_ENV: &str = "LOGGING_SVC_HTTP_ADDR";

/// Binder DSN, e.g. `memory://` or `kafka://broker1:9092,broker2:9092`.
pub const LOGGING_SVC_BINDER_DSN_ENV: &str = "LOGGING_SVC_BINDER_DSN";

/// Broker destination the `logProducer-out-0` binding maps to.
pub const LOGGING_SVC_PRODUCER_DESTINATION_ENV: &str = "LOGGING_SVC_PRODUCER_DESTINATION";

/// Broker destination the `logConsumer-in-0` binding maps to.
pub const LOGGING_SVC_CONSUMER_DESTINATION_ENV: &str = "LOGGING_SVC_CONSUMER_DESTINATION";

/// Consumer group used when subscribing.
pub const LOGGING_SVC_CONSUMER_GROUP_ENV: &str = "LOGGING_SVC_CONSUMER_GROUP";

/// `tracing` (default) or `console`.
pub const LOGGING_SVC_DIAGNOSTICS_ENV: &str = "LOGGING_SVC_DIAGNOSTICS";

/// `json` (default) or `pretty`.
pub const RUST_LOG_FORMAT_ENV: &str = "RUST_LOG_FORMAT";
