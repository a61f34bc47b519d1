use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, Duration};

use logging_svc::binder::Binder;
use logging_svc::consumer::{spawn_consumer, LogConsumer};
use logging_svc::diagnostics::Diagnostics;
use logging_svc::init::{init_tracing, LogFormat};
use logging_svc::memory::InMemoryBinder;
use logging_svc::publisher::LogPublisher;

#[tokio::main]
async fn main() {
    init_tracing(LogFormat::Pretty).expect("set global subscriber");

    let binder = Arc::new(InMemoryBinder::with_buffer(50_000));
    let subscription = binder.subscribe("logs", "load").await.expect("subscribe");
    let consumer = spawn_consumer(subscription, LogConsumer::new(Diagnostics::Structured));
    let publisher = LogPublisher::new(binder.clone(), "logs", Diagnostics::Structured);

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        publisher
            .publish("INFO", &format!("load test message {}", i))
            .await
            .expect("publish");
    }

    let elapsed = start.elapsed();
    println!("in-memory binder: published {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    // Give the consumer a little time to drain the channel
    sleep(Duration::from_secs(2)).await;
    println!("consumer received {} records", consumer.received());
}
