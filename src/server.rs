use axum::{
    extract::{FromRequest, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tokio::signal;
use tracing::{error, info};

use crate::error::PublishError;
use crate::publisher::LogPublisher;

/// Body returned by `POST /logs/send` once the record was handed to the
/// binder.
pub const PUBLISH_CONFIRMATION: &str = "✅ Log published successfully!";

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub publisher: LogPublisher,
}

/// Build the HTTP router:
/// - `POST /logs/send` publishes a record
/// - `GET  /health` liveness probe
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/logs/send", post(send_log))
        .route("/health", get(health))
        .with_state(state)
}

/// `level` and `message`, taken from the query string or a urlencoded form
/// body. Query values win when both are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendLogParams {
    pub level: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawParams {
    level: Option<String>,
    message: Option<String>,
}

impl<S> FromRequest<S> for SendLogParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RawParams>::try_from_uri(req.uri())
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

        let form = if is_form {
            let Form(form) = Form::<RawParams>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            form
        } else {
            RawParams::default()
        };

        let level = query
            .level
            .or(form.level)
            .ok_or(ApiError::MissingParameter("level"))?;
        let message = query
            .message
            .or(form.message)
            .ok_or(ApiError::MissingParameter("message"))?;

        Ok(SendLogParams { level, message })
    }
}

/// Handler for POST /logs/send
pub async fn send_log(
    State(state): State<AppState>,
    params: SendLogParams,
) -> Result<&'static str, ApiError> {
    state.publisher.publish(&params.level, &params.message).await?;
    Ok(PUBLISH_CONFIRMATION)
}

/// Handler for GET /health
pub async fn health() -> &'static str {
    "Healthy"
}

/// Errors surfaced to HTTP callers. Bodies are plain text.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Required parameter '{0}' is not present")]
    MissingParameter(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingParameter(_) | ApiError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ApiError::Publish(e) => {
                error!(error = %e, "failed to publish log");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to publish log").into_response()
            }
        }
    }
}

/// Wait for SIGTERM or SIGINT (Ctrl+C) for graceful shutdown
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
