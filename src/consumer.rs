use crate::binder::Subscription;
use crate::diagnostics::Diagnostics;
use crate::record::LogRecord;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::task::JoinHandle;

/// Callback registered on the inbound `logConsumer-in-0` binding.
///
/// Stateless: every call reports the record and returns. Persisting records
/// (database, search index) is not done here.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConsumer {
    diagnostics: Diagnostics,
}

impl LogConsumer {
    pub fn new(diagnostics: Diagnostics) -> Self {
        LogConsumer { diagnostics }
    }

    /// Handle one received record.
    pub fn on_receive(&self, record: LogRecord) {
        self.diagnostics.received(&record);
    }
}

/// Handle to a running consumer task started by [`spawn_consumer`].
pub struct ConsumerHandle {
    received: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl ConsumerHandle {
    /// Records delivered to the callback so far.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    /// Stop the consumer loop without waiting for queued records.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the loop to finish on its own, which happens once the
    /// subscription is closed by the binder.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            if e.is_panic() {
                tracing::error!(error = %e, "consumer task panicked");
            }
        }
    }
}

/// Drive `consumer` from `subscription` on a background task, invoking the
/// callback once per record in arrival order.
pub fn spawn_consumer(mut subscription: Subscription, consumer: LogConsumer) -> ConsumerHandle {
    let received = Arc::new(AtomicU64::new(0));
    let received_bg = Arc::clone(&received);

    let task = tokio::spawn(async move {
        tracing::info!(destination = subscription.destination(), "consumer started");
        while let Some(record) = subscription.recv().await {
            consumer.on_receive(record);
            received_bg.fetch_add(1, Ordering::Relaxed);
        }
        tracing::info!(destination = subscription.destination(), "consumer stopped");
    });

    ConsumerHandle { received, task }
}
