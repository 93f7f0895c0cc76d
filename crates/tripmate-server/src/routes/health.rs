use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Readiness also reports which model answers and how many sessions are live.
#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub agent: String,
    pub model: String,
    pub sessions: usize,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "tripmate",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let agent = state.planner.agent();
    Json(ReadyResponse {
        status: "ready",
        agent: agent.name().to_string(),
        model: agent.llm().default_model().to_string(),
        sessions: state.session_count().await,
    })
}
