use crate::binder::{decode_payload, Binder, Subscription};
use crate::error::BinderError;
use crate::record::LogRecord;
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use rdkafka::Message;
use std::time::Duration;
use tokio::sync::mpsc;

const CONTENT_TYPE_HEADER: &str = "contentType";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Kafka binder: destinations map one-to-one onto topics.
///
/// Records are published as JSON with a `contentType` header. Every
/// subscription gets its own `StreamConsumer` in the requested consumer
/// group, polled by a background task.
#[derive(Clone)]
pub struct KafkaBinder {
    producer: FutureProducer,
    brokers: String,
    channel_buffer: usize,
}

impl KafkaBinder {
    /// Create a new Kafka binder.
    ///
    /// `brokers` is a comma-separated list of broker addresses.
    pub fn new(brokers: &str) -> Result<Self, BinderError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .create()?;

        Ok(KafkaBinder {
            producer,
            brokers: brokers.to_string(),
            channel_buffer: crate::memory::DEFAULT_CHANNEL_BUFFER,
        })
    }
}

/// JSON payload plus the `contentType` header sent with every record.
fn encode_record(record: &LogRecord) -> Result<(Vec<u8>, OwnedHeaders), BinderError> {
    let payload = serde_json::to_vec(record)?;
    let headers = OwnedHeaders::new().insert(Header {
        key: CONTENT_TYPE_HEADER,
        value: Some(JSON_CONTENT_TYPE),
    });
    Ok((payload, headers))
}

#[async_trait]
impl Binder for KafkaBinder {
    async fn send(&self, destination: &str, record: &LogRecord) -> Result<(), BinderError> {
        let (payload, headers) = encode_record(record)?;

        let message = FutureRecord::<(), Vec<u8>>::to(destination)
            .payload(&payload)
            .headers(headers);
        self.producer
            .send(message, Timeout::Never)
            .await
            .map_err(|(e, _)| BinderError::Kafka(e))?;

        Ok(())
    }

    async fn subscribe(&self, destination: &str, group: &str) -> Result<Subscription, BinderError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .set("group.id", group)
            .set("enable.auto.commit", "true")
            .create()?;
        consumer.subscribe(&[destination])?;

        let (tx, rx) = mpsc::channel(self.channel_buffer);
        let topic = destination.to_string();

        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    _ = tx.closed() => break,
                    received = consumer.recv() => received.map(|m| m.payload().map(<[u8]>::to_vec)),
                };

                match received {
                    Ok(Some(payload)) => {
                        let Some(record) = decode_payload(&topic, &payload) else {
                            continue;
                        };
                        if tx.send(record).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => tracing::warn!(topic = %topic, "dropping kafka message without payload"),
                    Err(e) => tracing::warn!(topic = %topic, error = %e, "kafka receive failed"),
                }
            }
            tracing::debug!(topic = %topic, "kafka subscription closed");
        });

        Ok(Subscription::new(destination, rx))
    }

    async fn flush(&self) -> Result<(), BinderError> {
        let producer = self.producer.clone();
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(Duration::from_secs(5))))
            .await
            .map_err(|e| BinderError::Unavailable(e.to_string()))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SERVICE_NAME;
    use rdkafka::message::Headers;

    #[test]
    fn encodes_json_payload_with_content_type_header() {
        let record = LogRecord::new("ERROR", "disk full", SERVICE_NAME, "2025-01-10T12:00:00Z");
        let (payload, headers) = encode_record(&record).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "level": "ERROR",
                "message": "disk full",
                "serviceName": "logging-svc",
                "timestamp": "2025-01-10T12:00:00Z",
            })
        );

        assert_eq!(headers.count(), 1);
        let header = headers.get(0);
        assert_eq!(header.key, "contentType");
        assert_eq!(header.value, Some(b"application/json".as_slice()));
    }

    #[test]
    fn encoded_payload_decodes_back_to_the_same_record() {
        let record = LogRecord::stamped("INFO", "hello");
        let (payload, _) = encode_record(&record).unwrap();
        assert_eq!(decode_payload("logs", &payload), Some(record));
    }
}
