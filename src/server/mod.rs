use crate::error::LookupError;
use crate::models::ErrorResponse;
use crate::{handlers, AppState};
use anyhow::{anyhow, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

pub async fn start_server(state: Arc<AppState>, port: u16, base_path: &str) -> Result<()> {
    let app = create_router(state, base_path);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, base_path, "Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(err) = server.await {
        error!("Server error: {err:?}");
        return Err(anyhow!("Server error: {}", err));
    }

    Ok(())
}

/// Build the service router, mounted under `base_path` when it is non-empty.
pub fn create_router(state: Arc<AppState>, base_path: &str) -> Router {
    let api = Router::new()
        .route("/api/user", post(user_handler).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .with_state(state);

    let app = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(base_path, api)
    };

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

async fn user_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("Rejected request body: {err}");
            return json_error(StatusCode::BAD_REQUEST, "Invalid JSON");
        }
    };

    let raw = username_field(&payload);
    match handlers::resolve_and_aggregate(&state.scratch, &raw).await {
        Ok(profile) => json_response(StatusCode::OK, &profile),
        Err(err) => {
            if matches!(err, LookupError::Http(_)) {
                error!(input = %raw, "Profile lookup failed: {err:?}");
            } else {
                info!(input = %raw, "Profile lookup rejected: {err}");
            }
            json_error(err.status(), err.public_message())
        }
    }
}

/// Read `username` leniently: strings as-is, numbers and `true` stringified,
/// anything else (including a non-object body) treated as empty.
fn username_field(payload: &Value) -> String {
    match payload.get("username") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

async fn method_not_allowed() -> Response {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CACHE_CONTROL, "no-store")], Json(body)).into_response()
}

fn json_error(status: StatusCode, message: &str) -> Response {
    json_response(status, &ErrorResponse::new(message))
}

async fn shutdown_signal() {
    let received = first_shutdown_signal(ctrl_c_received(), terminate_received()).await;
    info!(signal = received, "Shutdown signal received, stopping server");
}

/// Resolves with the name of whichever signal arrives first.
async fn first_shutdown_signal(
    ctrl_c: impl Future<Output = ()>,
    terminate: impl Future<Output = ()>,
) -> &'static str {
    tokio::select! {
        _ = ctrl_c => "ctrl_c",
        _ = terminate => "terminate",
    }
}

// A handler that cannot be installed never fires; the other one still can.
async fn ctrl_c_received() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("Ctrl+C handler unavailable: {err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate_received() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(err) => {
            warn!("SIGTERM handler unavailable: {err}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate_received() {
    std::future::pending::<()>().await
}
