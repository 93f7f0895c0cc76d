use crate::templates::Templates;
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;
use tripmate_agent::{Session, TripPlanner};
use tripmate_core::SessionId;

use crate::cookie::session_id_from_headers;

const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
    pub templates: Arc<Templates>,
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    idle_timeout: Duration,
}

impl AppState {
    pub fn new(planner: TripPlanner, templates: Templates) -> Self {
        Self {
            planner: Arc::new(planner),
            templates: Arc::new(templates),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Returns the stored session for `session_id`, or a fresh one that is
    /// not stored. Pages that only read state use this, so visitors who never
    /// submit leave nothing behind.
    pub async fn lookup_session(&self, session_id: Option<SessionId>) -> Session {
        if let Some(id) = session_id {
            if let Some(session) = self.get_session(&id).await {
                return session;
            }
        }

        // Unknown ids (e.g. a cookie that outlived a restart) are reused so the
        // browser keeps its cookie.
        session_id.map(Session::with_id).unwrap_or_default()
    }

    /// Returns the stored session for `session_id`, storing a new one if
    /// needed. Idle sessions are swept first.
    pub async fn register_session(&self, session_id: Option<SessionId>) -> Session {
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.idle_timeout));
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "Dropped idle sessions");
        }

        let session = session_id.map(Session::with_id).unwrap_or_default();
        let session = sessions
            .entry(*session.id())
            .or_insert(session)
            .clone();
        session.touch();
        debug!(session = %session.id(), total = sessions.len(), "Session ready");
        session
    }

    pub async fn session_from_headers(&self, headers: &HeaderMap) -> Session {
        self.lookup_session(session_id_from_headers(headers)).await
    }

    pub async fn register_from_headers(&self, headers: &HeaderMap) -> Session {
        self.register_session(session_id_from_headers(headers)).await
    }

    /// A stored session that has not gone idle. Reading it counts as use.
    pub async fn get_session(&self, session_id: &SessionId) -> Option<Session> {
        let session = self.sessions.read().await.get(session_id).cloned()?;
        if session.is_expired(self.idle_timeout) {
            return None;
        }
        session.touch();
        Some(session)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
