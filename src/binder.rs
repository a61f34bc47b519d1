use crate::error::BinderError;
use crate::record::LogRecord;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Logical name of the outbound binding the publisher writes to.
pub const PRODUCER_BINDING: &str = "logProducer-out-0";

/// Logical name of the inbound binding the consumer is registered on.
pub const CONSUMER_BINDING: &str = "logConsumer-in-0";

/// Connection to the messaging middleware.
///
/// Implementations are responsible for serializing records, transporting
/// them to a concrete broker (Kafka, in-process channels, etc) and for
/// decoding inbound payloads before handing them to a [`Subscription`].
/// A handle is created once per process and shared read-only between
/// request handlers and the consumer runtime.
#[async_trait]
pub trait Binder: Send + Sync {
    /// Hand a single record to the broker for `destination`.
    ///
    /// **Returns**
    /// - `Ok(())` once the record was accepted by the local send primitive.
    ///   This is not a downstream delivery acknowledgment.
    /// - `Err(..)` if the record could not be serialized or the broker
    ///   refused it.
    async fn send(&self, destination: &str, record: &LogRecord) -> Result<(), BinderError>;

    /// Start receiving records published to `destination` as a member of
    /// consumer `group`.
    ///
    /// Payloads that fail to decode are dropped by the binder and never
    /// surface on the returned subscription.
    async fn subscribe(&self, destination: &str, group: &str) -> Result<Subscription, BinderError>;

    /// Flush any locally buffered records. Default implementation is a no-op.
    async fn flush(&self) -> Result<(), BinderError> {
        Ok(())
    }
}

/// Stream of decoded records delivered by a [`Binder`].
#[derive(Debug)]
pub struct Subscription {
    destination: String,
    receiver: mpsc::Receiver<LogRecord>,
}

impl Subscription {
    pub fn new(destination: impl Into<String>, receiver: mpsc::Receiver<LogRecord>) -> Self {
        Subscription {
            destination: destination.into(),
            receiver,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Wait for the next record. Returns `None` once the binder side has
    /// been closed.
    pub async fn recv(&mut self) -> Option<LogRecord> {
        self.receiver.recv().await
    }

    /// Take a record that is already queued without waiting.
    pub fn try_recv(&mut self) -> Option<LogRecord> {
        self.receiver.try_recv().ok()
    }
}

/// Decode an inbound payload, logging and discarding anything malformed.
pub(crate) fn decode_payload(destination: &str, payload: &[u8]) -> Option<LogRecord> {
    match serde_json::from_slice::<LogRecord>(payload) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(destination, error = %e, "dropping undecodable payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_payload_accepts_wire_json() {
        let payload = br#"{"level":"INFO","message":"hi","serviceName":"logging-svc","timestamp":"2025-01-10T12:00:00Z"}"#;
        let record = decode_payload("logs", payload).expect("valid payload");
        assert_eq!(record.message(), "hi");
        assert_eq!(record.service_name(), "logging-svc");
    }

    #[test]
    fn decode_payload_drops_garbage() {
        assert!(decode_payload("logs", b"not json").is_none());
        assert!(decode_payload("logs", b"[1, 2]").is_none());
    }

    #[test]
    fn decode_payload_delivers_partial_records() {
        let payload = br#"{"level":"INFO","message":"from another producer"}"#;
        let record = decode_payload("logs", payload).expect("partial payload is delivered");
        assert_eq!(record.message(), "from another producer");
        assert_eq!(record.service_name(), "");
        assert_eq!(record.timestamp(), "");
    }

    #[tokio::test]
    async fn subscription_ends_when_sender_dropped() {
        let (tx, rx) = mpsc::channel(4);
        let mut sub = Subscription::new("logs", rx);
        tx.send(LogRecord::stamped("INFO", "one")).await.unwrap();
        drop(tx);

        assert_eq!(sub.destination(), "logs");
        assert_eq!(sub.recv().await.unwrap().message(), "one");
        assert!(sub.recv().await.is_none());
    }
}
