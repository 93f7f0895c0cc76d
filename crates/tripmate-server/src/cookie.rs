//! Session identity carried in a cookie.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use std::str::FromStr;
use tripmate_core::SessionId;

pub const SESSION_COOKIE: &str = "tripmate_session";

/// Header API clients use in place of the cookie.
pub const SESSION_HEADER: &str = "x-tripmate-session";

/// Finds the session cookie among all `Cookie` headers. Malformed ids are
/// ignored so the caller starts a fresh session.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::from_str(value.trim()).ok())
}

/// The caller's session id for the JSON API: the session header if present,
/// else the cookie. A header that is not a valid id is an error.
pub fn api_session_id(headers: &HeaderMap) -> Result<Option<SessionId>, String> {
    match headers.get(SESSION_HEADER) {
        Some(value) => {
            let raw = value.to_str().map_err(|_| "Invalid session id".to_string())?;
            SessionId::from_str(raw.trim())
                .map(Some)
                .map_err(|_| format!("Invalid session id: {}", raw))
        }
        None => Ok(session_id_from_headers(headers)),
    }
}

pub fn session_cookie(id: &SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
