//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::TimeDelta;
use tracing::error;

use crate::state::{AppState, TransitionOutcome};
use super::responses::{ApiResponse, FreezeRequest, HealthResponse, StartRequest, StatusResponse};

fn respond(
    action: &str,
    result: Result<TransitionOutcome, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(action, outcome))),
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Durations must fit in i64 nanoseconds
fn millis(ms: i64) -> Result<TimeDelta, StatusCode> {
    TimeDelta::try_milliseconds(ms)
        .filter(|delta| delta.num_nanoseconds().is_some())
        .ok_or(StatusCode::BAD_REQUEST)
}

/// Handle POST /timer/start - Start the countdown, optionally with a new duration
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StartRequest>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let duration = match body.and_then(|Json(request)| request.duration_ms) {
        Some(ms) => Some(millis(ms)?),
        None => None,
    };
    respond("start", state.start(duration))
}

/// Handle POST /timer/stop
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("stop", state.stop())
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", state.pause())
}

/// Handle POST /timer/resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("resume", state.resume())
}

/// Handle POST /timer/freeze - Open a freeze window
pub async fn freeze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FreezeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let freeze_duration = millis(request.freeze_duration_ms)?;
    respond("freeze", state.freeze(freeze_duration))
}

/// Handle POST /timer/defrost
pub async fn defrost_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("defrost", state.defrost())
}

/// Handle POST /timer/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", state.reset())
}

/// Handle GET /timer - Return the current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
