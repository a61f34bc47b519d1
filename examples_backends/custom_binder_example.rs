use std::sync::Arc;

use async_trait::async_trait;
use logging_svc::{
    binder::{Binder, Subscription},
    diagnostics::Diagnostics,
    error::BinderError,
    init::{init_tracing, LogFormat},
    publisher::LogPublisher,
    record::LogRecord,
};

/// Example of integrating a completely custom broker by implementing the
/// `Binder` trait directly. Imagine this talks to some proprietary queue
/// for which this crate does not provide a built-in binder.
struct MyCustomQueueBinder;

#[async_trait]
impl Binder for MyCustomQueueBinder {
    async fn send(&self, destination: &str, record: &LogRecord) -> Result<(), BinderError> {
        // Here you would call your own client library for the target queue.
        // For the sake of example we just print the record.
        println!("[my-custom-queue:{}] {}", destination, record);
        Ok(())
    }

    async fn subscribe(&self, destination: &str, _group: &str) -> Result<Subscription, BinderError> {
        Err(BinderError::Unavailable(format!("{} is publish-only", destination)))
    }
}

#[tokio::main]
async fn main() {
    init_tracing(LogFormat::Pretty).expect("set global subscriber");

    let binder: Arc<dyn Binder> = Arc::new(MyCustomQueueBinder);
    let publisher = LogPublisher::new(binder, "logs", Diagnostics::Structured);

    publisher
        .publish("ERROR", "simulated error sent via custom binder")
        .await
        .expect("publish");
}
