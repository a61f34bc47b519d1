use thiserror::Error;

/// Failure reported by a [`Binder`](crate::binder::Binder) implementation.
#[derive(Error, Debug)]
pub enum BinderError {
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("broker unavailable: {0}")]
    Unavailable(String),

    #[cfg(feature = "kafka")]
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}

/// Error returned by [`LogPublisher`](crate::publisher::LogPublisher) when the
/// binder refuses a record. Never retried.
#[derive(Error, Debug)]
#[error("failed to publish log to {destination}: {source}")]
pub struct PublishError {
    pub destination: String,
    #[source]
    pub source: BinderError,
}

/// Invalid or missing process settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} cannot be empty")]
    Empty { name: &'static str },

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Process-level failures surfaced from `main`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to install tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid binder DSN: {0}")]
    Dsn(#[from] crate::backend::DsnError),

    #[error("failed to build binder: {0}")]
    Binder(#[from] crate::backend::BinderBuildError),

    #[error("failed to subscribe consumer: {0}")]
    Subscribe(#[source] BinderError),

    #[error("failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
