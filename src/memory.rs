use crate::binder::{decode_payload, Binder, Subscription};
use crate::error::BinderError;
use crate::record::LogRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Default per-subscription queue size.
pub const DEFAULT_CHANNEL_BUFFER: usize = 1024;

/// In-process binder that fans each record out to every live subscription
/// of a destination.
///
/// Records still go through the JSON wire format so that serialization
/// failures and lossy mappings surface the same way they would with a real
/// broker. Useful for local runs and tests that don't need Kafka.
pub struct InMemoryBinder {
    channel_buffer: usize,
    subscribers: Mutex<HashMap<String, Vec<mpsc::Sender<LogRecord>>>>,
}

impl InMemoryBinder {
    pub fn new() -> Self {
        Self::with_buffer(DEFAULT_CHANNEL_BUFFER)
    }

    /// Create a binder whose subscriptions queue at most `channel_buffer`
    /// undelivered records before `send` waits for the consumer.
    pub fn with_buffer(channel_buffer: usize) -> Self {
        InMemoryBinder {
            channel_buffer: channel_buffer.max(1),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Number of live subscriptions on `destination`.
    pub fn subscriber_count(&self, destination: &str) -> usize {
        let subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subscribers
            .get(destination)
            .map(|list| list.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }

    fn live_senders(&self, destination: &str) -> Vec<mpsc::Sender<LogRecord>> {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        match subscribers.get_mut(destination) {
            Some(list) => {
                list.retain(|tx| !tx.is_closed());
                list.clone()
            }
            None => Vec::new(),
        }
    }
}

impl Default for InMemoryBinder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Binder for InMemoryBinder {
    async fn send(&self, destination: &str, record: &LogRecord) -> Result<(), BinderError> {
        let payload = serde_json::to_vec(record)?;

        let senders = self.live_senders(destination);
        if senders.is_empty() {
            tracing::debug!(destination, "no subscribers, dropping record");
            return Ok(());
        }

        for tx in senders {
            let Some(decoded) = decode_payload(destination, &payload) else {
                continue;
            };
            // A subscription closing mid-send is not a publish failure.
            if tx.send(decoded).await.is_err() {
                tracing::debug!(destination, "subscription closed during send");
            }
        }
        Ok(())
    }

    async fn subscribe(&self, destination: &str, group: &str) -> Result<Subscription, BinderError> {
        let (tx, rx) = mpsc::channel(self.channel_buffer);
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subscribers.entry(destination.to_string()).or_default().push(tx);
        tracing::debug!(destination, group, "in-memory subscription registered");
        Ok(Subscription::new(destination, rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SERVICE_NAME;

    #[tokio::test]
    async fn send_without_subscribers_succeeds() {
        let binder = InMemoryBinder::new();
        let record = LogRecord::stamped("INFO", "nobody listens");
        assert!(binder.send("logs", &record).await.is_ok());
        assert_eq!(binder.subscriber_count("logs"), 0);
    }

    #[tokio::test]
    async fn record_survives_the_wire_unchanged() {
        let binder = InMemoryBinder::new();
        let mut sub = binder.subscribe("logs", "group").await.unwrap();

        let sent = LogRecord::new("ERROR", "disk full", SERVICE_NAME, "2025-01-10T12:00:00.5Z");
        binder.send("logs", &sent).await.unwrap();

        let received = sub.recv().await.unwrap();
        assert_eq!(received, sent);
    }

    #[tokio::test]
    async fn fans_out_to_every_subscription() {
        let binder = InMemoryBinder::new();
        let mut a = binder.subscribe("logs", "a").await.unwrap();
        let mut b = binder.subscribe("logs", "b").await.unwrap();
        let mut other = binder.subscribe("audit", "a").await.unwrap();

        binder.send("logs", &LogRecord::stamped("INFO", "hello")).await.unwrap();

        assert_eq!(a.recv().await.unwrap().message(), "hello");
        assert_eq!(b.recv().await.unwrap().message(), "hello");
        assert!(other.try_recv().is_none());
    }

    #[tokio::test]
    async fn dropped_subscriptions_are_pruned() {
        let binder = InMemoryBinder::new();
        let sub = binder.subscribe("logs", "group").await.unwrap();
        assert_eq!(binder.subscriber_count("logs"), 1);

        drop(sub);
        binder.send("logs", &LogRecord::stamped("INFO", "gone")).await.unwrap();
        assert_eq!(binder.subscriber_count("logs"), 0);
    }
}
