use tokio::time::{sleep, Duration};
use tracing::info;

use logging_svc::backend::{make_binder_from_config, parse_dsn};
use logging_svc::consumer::{spawn_consumer, LogConsumer};
use logging_svc::diagnostics::Diagnostics;
use logging_svc::init::{init_tracing, LogFormat};
use logging_svc::publisher::LogPublisher;

#[tokio::main]
async fn main() {
    init_tracing(LogFormat::Pretty).expect("set global subscriber");

    // Example DSN: kafka://broker1:9092,broker2:9092
    let dsn = std::env::var("LOGGING_SVC_BINDER_DSN")
        .unwrap_or_else(|_| "kafka://localhost:9092".to_string());

    let binder_cfg = parse_dsn(&dsn).expect("invalid LOGGING_SVC_BINDER_DSN");
    let binder = make_binder_from_config(&binder_cfg).expect("failed to build kafka binder");

    let subscription = binder
        .subscribe("logs", "kafka-example")
        .await
        .expect("subscribe to logs topic");
    let consumer = spawn_consumer(subscription, LogConsumer::default());

    let publisher = LogPublisher::new(binder.clone(), "logs", Diagnostics::Structured);
    info!("kafka backend example started");
    publisher
        .publish("ERROR", "simulated error sent via Kafka binder")
        .await
        .expect("publish to kafka");
    binder.flush().await.expect("flush producer");

    sleep(Duration::from_secs(5)).await;
    info!(received = consumer.received(), "kafka backend example finished");
}
