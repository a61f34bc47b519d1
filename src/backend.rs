use std::sync::Arc;

use crate::binder::Binder;
use crate::memory::InMemoryBinder;

/// Supported binder kinds that can be selected via DSN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinderKind {
    Memory,
    Kafka,
}

/// Binder configuration built from a DSN.
#[derive(Debug, Clone)]
pub struct BinderConfig {
    /// Selected binder implementation.
    pub kind: BinderKind,
    /// Raw DSN that was used to construct this config.
    pub dsn: String,
}

impl BinderConfig {
    pub fn new(kind: BinderKind, dsn: impl Into<String>) -> Self {
        BinderConfig { kind, dsn: dsn.into() }
    }

    /// DSN with the scheme stripped, e.g. `broker1:9092,broker2:9092` for
    /// `kafka://broker1:9092,broker2:9092`.
    pub fn address(&self) -> &str {
        self.dsn
            .split_once("://")
            .map(|(_, rest)| rest.trim_end_matches('/'))
            .unwrap_or("")
    }
}

/// Parse a DSN string and infer the binder kind from its scheme.
///
/// Examples:
/// - "memory://"
/// - "kafka://broker1:9092,broker2:9092"
pub fn parse_dsn(dsn: &str) -> Result<BinderConfig, DsnError> {
    let lower = dsn.to_ascii_lowercase();

    if lower.starts_with("memory://") {
        Ok(BinderConfig::new(BinderKind::Memory, dsn))
    } else if lower.starts_with("kafka://") {
        let config = BinderConfig::new(BinderKind::Kafka, dsn);
        if config.address().is_empty() {
            return Err(DsnError::MissingAddress);
        }
        Ok(config)
    } else {
        Err(DsnError::UnknownScheme)
    }
}

/// Error type returned when parsing a DSN.
#[derive(thiserror::Error, Debug)]
pub enum DsnError {
    #[error("unknown or unsupported DSN scheme")]
    UnknownScheme,

    #[error("DSN has no broker address")]
    MissingAddress,
}

/// Error type returned when building a binder from configuration.
#[derive(thiserror::Error, Debug)]
pub enum BinderBuildError {
    #[error("kafka feature is not enabled")]
    KafkaFeatureDisabled,

    #[error(transparent)]
    Binder(#[from] crate::error::BinderError),
}

/// Create a concrete [`Binder`] from a [`BinderConfig`].
pub fn make_binder_from_config(cfg: &BinderConfig) -> Result<Arc<dyn Binder>, BinderBuildError> {
    match cfg.kind {
        BinderKind::Memory => Ok(Arc::new(InMemoryBinder::new()) as Arc<dyn Binder>),
        BinderKind::Kafka => {
            #[cfg(feature = "kafka")]
            {
                use crate::kafka::KafkaBinder;

                let binder = KafkaBinder::new(cfg.address())?;
                Ok(Arc::new(binder) as Arc<dyn Binder>)
            }

            #[cfg(not(feature = "kafka"))]
            {
                let _ = cfg;
                Err(BinderBuildError::KafkaFeatureDisabled)
            }
        }
    }
}
