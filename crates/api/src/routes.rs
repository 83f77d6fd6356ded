use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::state::{AppState, StartSessionError};
use crate::ws;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_snapshot))
        .route("/trading/start", post(start_trading))
        .route("/trading/stop", post(stop_trading))
        .route("/ws/stream", get(ws::event_stream))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct StartTradingResponse {
    session_id: u64,
}

#[derive(Debug, Serialize)]
struct StopTradingResponse {
    was_active: bool,
}

async fn dashboard_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.snapshot())
}

async fn start_trading(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let session_id = state.start_session().map_err(|err| match err {
        StartSessionError::AlreadyTrading => StatusCode::CONFLICT,
        StartSessionError::SessionIdOverflow => StatusCode::INTERNAL_SERVER_ERROR,
    })?;
    let location = format!("/trading/sessions/{session_id}");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(StartTradingResponse { session_id }),
    ))
}

async fn stop_trading(State(state): State<AppState>) -> impl IntoResponse {
    let was_active = state.stop_session();
    Json(StopTradingResponse { was_active })
}
