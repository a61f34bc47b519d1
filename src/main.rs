use logging_svc::backend::{make_binder_from_config, parse_dsn};
use logging_svc::binder::{CONSUMER_BINDING, PRODUCER_BINDING};
use logging_svc::config::Settings;
use logging_svc::consumer::{spawn_consumer, LogConsumer};
use logging_svc::error::AppError;
use logging_svc::init::init_tracing;
use logging_svc::publisher::LogPublisher;
use logging_svc::server::{router, shutdown_signal, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format)?;
    info!(?settings, "Loaded settings");

    let binder_cfg = parse_dsn(&settings.binder_dsn)?;
    let binder = make_binder_from_config(&binder_cfg)?;
    info!(kind = ?binder_cfg.kind, "Binder ready");

    let subscription = binder
        .subscribe(&settings.consumer_destination, &settings.consumer_group)
        .await
        .map_err(AppError::Subscribe)?;
    let consumer = spawn_consumer(subscription, LogConsumer::new(settings.diagnostics));
    info!(
        binding = CONSUMER_BINDING,
        destination = %settings.consumer_destination,
        group = %settings.consumer_group,
        "Consumer registered"
    );

    let publisher = LogPublisher::new(
        binder.clone(),
        settings.producer_destination.clone(),
        settings.diagnostics,
    );
    info!(
        binding = PRODUCER_BINDING,
        destination = %settings.producer_destination,
        "Publisher ready"
    );

    let app = router(AppState { publisher });

    let listener = tokio::net::TcpListener::bind(settings.http_addr)
        .await
        .map_err(|e| AppError::Bind {
            address: settings.http_addr.to_string(),
            source: e,
        })?;
    info!("Listening on {}", listener.local_addr()?);
    info!("  - POST /logs/send  (publish a log record)");
    info!("  - GET  /health     (health check)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = binder.flush().await {
        warn!(error = %e, "failed to flush binder on shutdown");
    }
    consumer.abort();
    info!(received = consumer.received(), "Server shutdown complete");
    Ok(())
}
