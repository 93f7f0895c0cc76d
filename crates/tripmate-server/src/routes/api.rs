use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tripmate_agent::{HistoryEntry, PlanOutcome, TripForm};
use tripmate_core::SessionId;

use crate::cookie::api_session_id;
use crate::error::{Result, ServerError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PlanRequest {
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub trip: TripForm,
}

#[derive(Serialize)]
pub struct PlanResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub outcome: PlanOutcome,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    /// Most recent first.
    pub entries: Vec<HistoryEntry>,
    pub viewed: Option<HistoryEntry>,
}

/// A `session_id` in the body wins over the session header or cookie.
pub async fn plan_api(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>> {
    let session_id = match request.session_id.as_deref() {
        Some(raw) => Some(
            SessionId::from_str(raw)
                .map_err(|_| ServerError::bad_request(format!("Invalid session id: {}", raw)))?,
        ),
        None => api_session_id(&headers).map_err(ServerError::bad_request)?,
    };
    let session = state.register_session(session_id).await;

    let outcome = state
        .planner
        .submit(&session, request.trip)
        .await
        .map_err(ServerError::from)?;

    Ok(Json(PlanResponse {
        session_id: session.id().to_string(),
        outcome,
    }))
}

/// History of the caller's own session, named by the session header or
/// cookie.
pub async fn session_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<HistoryResponse>> {
    let id = api_session_id(&headers)
        .map_err(ServerError::bad_request)?
        .ok_or_else(|| ServerError::not_found("No session"))?;
    let session = state
        .get_session(&id)
        .await
        .ok_or_else(|| ServerError::not_found(format!("Session {}", id)))?;

    Ok(Json(HistoryResponse {
        session_id: id.to_string(),
        entries: session.history_recent_first(),
        viewed: session.viewed(),
    }))
}
