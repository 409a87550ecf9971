// Liveness and database health endpoints

use axum::{extract::State, http::StatusCode};
use serde_json::json;
use tracing::{instrument, warn};

use crate::config::state::AppState;
use crate::utils::response_handler::HandlerResponse;

/// Service identity. Never touches the database.
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> HandlerResponse {
    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.environment.environment,
            "instance": instance_identifier(),
        }))
        .message("Service is running")
}

/// Health check endpoint that verifies database connectivity
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> HandlerResponse {
    match state.database.ping().await {
        Ok(()) => HandlerResponse::new(StatusCode::OK)
            .data(json!({
                "database": "connected",
                "pool": state.database.stats(),
            }))
            .message("Database connection healthy"),
        Err(e) => {
            warn!("Database health check failed: {}", e);
            HandlerResponse::new(StatusCode::SERVICE_UNAVAILABLE)
                .data(json!({ "database": "disconnected" }))
                .message("Database connection failed")
        }
    }
}

fn instance_identifier() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .map(|name| format!("host_{name}"))
        .unwrap_or_else(|| format!("process_{}", std::process::id()))
}
