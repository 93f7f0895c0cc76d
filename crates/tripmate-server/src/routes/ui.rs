use axum::{
    extract::{Path, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use tripmate_agent::{AgentError, PlanOutcome, Session, TripForm};

use crate::cookie::session_cookie;
use crate::error::{Result, ServerError};
use crate::state::AppState;
use crate::templates::PageView;

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let session = state.session_from_headers(&headers).await;
    render(&state, &session, StatusCode::OK, PageView::for_session(&session))
}

pub async fn submit_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TripForm>,
) -> Result<Response> {
    let session = state.register_from_headers(&headers).await;

    match state.planner.submit(&session, form).await {
        Ok(PlanOutcome::Planned { entry }) => {
            let view = PageView::for_session(&session).with_result(entry);
            render(&state, &session, StatusCode::OK, view)
        }
        Ok(PlanOutcome::Rejected { warning }) => {
            let view = PageView::for_session(&session).with_warning(warning);
            render(&state, &session, StatusCode::OK, view)
        }
        Err(AgentError::InvalidInput(message)) => {
            let view = PageView::for_session(&session).with_warning(message);
            render(&state, &session, StatusCode::BAD_REQUEST, view)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn view_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(position): Path<usize>,
) -> Result<Response> {
    let session = state.session_from_headers(&headers).await;

    match session.view(position) {
        Ok(_) => render(&state, &session, StatusCode::OK, PageView::for_session(&session)),
        Err(AgentError::HistoryNotFound(_)) => {
            let view = PageView::for_session(&session)
                .with_warning(format!("There is no past plan #{}.", position));
            render(&state, &session, StatusCode::NOT_FOUND, view)
        }
        Err(e) => Err(e.into()),
    }
}

fn render(state: &AppState, session: &Session, status: StatusCode, view: PageView) -> Result<Response> {
    let body = state.templates.render_page(&view)?;
    let cookie = HeaderValue::from_str(&session_cookie(session.id()))
        .map_err(|e| ServerError::internal(format!("Invalid session cookie: {}", e)))?;

    let mut response = (status, Html(body)).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
