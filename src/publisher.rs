use crate::binder::Binder;
use crate::diagnostics::Diagnostics;
use crate::error::PublishError;
use crate::record::LogRecord;
use std::sync::Arc;

/// Publishes log records onto the outbound `logProducer-out-0` binding.
///
/// Holds a shared handle to the process-wide [`Binder`]; cloning is cheap
/// and every clone talks to the same broker connection.
#[derive(Clone)]
pub struct LogPublisher {
    binder: Arc<dyn Binder>,
    destination: String,
    diagnostics: Diagnostics,
}

impl LogPublisher {
    /// **Parameters**
    /// - `binder`: shared broker connection.
    /// - `destination`: broker destination the outbound binding maps to.
    /// - `diagnostics`: where successful hand-offs are reported.
    pub fn new(binder: Arc<dyn Binder>, destination: impl Into<String>, diagnostics: Diagnostics) -> Self {
        LogPublisher {
            binder,
            destination: destination.into(),
            diagnostics,
        }
    }

    /// Stamp `level` and `message` with this service's name and the current
    /// time, then publish the resulting record.
    ///
    /// No validation is applied; empty strings are published as-is.
    pub async fn publish(&self, level: &str, message: &str) -> Result<(), PublishError> {
        self.publish_record(&LogRecord::stamped(level, message)).await
    }

    /// Send an already-built record exactly once.
    ///
    /// **Returns**
    /// - `Ok(())` once the binder accepted the record. This says nothing
    ///   about downstream delivery.
    /// - `Err(PublishError)` if the binder failed. The record is not retried.
    pub async fn publish_record(&self, record: &LogRecord) -> Result<(), PublishError> {
        self.binder
            .send(&self.destination, record)
            .await
            .map_err(|source| PublishError {
                destination: self.destination.clone(),
                source,
            })?;

        self.diagnostics.published(&self.destination, record);
        Ok(())
    }
}
