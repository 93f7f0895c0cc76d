use crate::error::{AgentError, Result};
use crate::trip::TripForm;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tripmate_core::{SessionId, Timestamp};

/// One past submission and what came back for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub response: String,
    #[serde(default)]
    pub is_error: bool,
    pub created_at: Timestamp,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            is_error: false,
            created_at: Timestamp::now(),
        }
    }

    pub fn with_error(mut self, is_error: bool) -> Self {
        self.is_error = is_error;
        self
    }

    /// First 25 characters of the query followed by `...`, as listed in the
    /// past plans sidebar.
    pub fn preview(&self) -> String {
        let head: String = self.query.chars().take(25).collect();
        format!("{}...", head)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Displayed,
}

#[derive(Debug)]
struct SessionInner {
    history: Vec<HistoryEntry>,
    viewed: Option<usize>,
    state: SubmissionState,
    last_form: Option<TripForm>,
    last_seen: Instant,
}

impl Default for SessionInner {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            viewed: None,
            state: SubmissionState::default(),
            last_form: None,
            last_seen: Instant::now(),
        }
    }
}

/// State owned by a single browser session.
///
/// History is append-only and kept in insertion order; recent-first views
/// are produced on read. Clones share the same state.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    created_at: Timestamp,
    inner: Arc<RwLock<SessionInner>>,
    submission: Arc<Mutex<()>>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            created_at: Timestamp::now(),
            inner: Arc::new(RwLock::new(SessionInner::default())),
            submission: Arc::new(Mutex::new(())),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn record(&self, entry: HistoryEntry) {
        self.inner.write().history.push(entry);
    }

    /// Entries in insertion order, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.inner.read().history.clone()
    }

    pub fn history_recent_first(&self) -> Vec<HistoryEntry> {
        self.inner.read().history.iter().rev().cloned().collect()
    }

    pub fn history_len(&self) -> usize {
        self.inner.read().history.len()
    }

    pub fn latest(&self) -> Option<HistoryEntry> {
        self.inner.read().history.last().cloned()
    }

    /// Selects the `position`-th most recent entry (1-based) for display.
    pub fn view(&self, position: usize) -> Result<HistoryEntry> {
        let mut inner = self.inner.write();
        let len = inner.history.len();
        if position == 0 || position > len {
            return Err(AgentError::HistoryNotFound(position));
        }

        let index = len - position;
        inner.viewed = Some(index);
        Ok(inner.history[index].clone())
    }

    pub fn viewed(&self) -> Option<HistoryEntry> {
        let inner = self.inner.read();
        inner.viewed.and_then(|index| inner.history.get(index).cloned())
    }

    /// Marks the session as used just now.
    pub fn touch(&self) {
        self.inner.write().last_seen = Instant::now();
    }

    /// Time since the session was created or last touched.
    pub fn idle_for(&self) -> Duration {
        self.inner.read().last_seen.elapsed()
    }

    /// Idle past `ttl` and not in the middle of a submission.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let inner = self.inner.read();
        inner.state != SubmissionState::Pending && inner.last_seen.elapsed() > ttl
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.read().state
    }

    pub fn remember_form(&self, form: &TripForm) {
        self.inner.write().last_form = Some(form.clone());
    }

    pub fn last_form(&self) -> Option<TripForm> {
        self.inner.read().last_form.clone()
    }

    pub fn dark_mode(&self) -> bool {
        self.inner
            .read()
            .last_form
            .as_ref()
            .map(|form| form.dark_mode)
            .unwrap_or(false)
    }

    /// Waits for any in-flight submission on this session, then marks the
    /// session pending.
    pub(crate) async fn begin_submission(&self) -> SubmissionGuard {
        let permit = self.submission.clone().lock_owned().await;
        self.set_state(SubmissionState::Pending);
        SubmissionGuard {
            session: self.clone(),
            _permit: permit,
            finished: false,
        }
    }

    fn set_state(&self, state: SubmissionState) {
        self.inner.write().state = state;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Held for the duration of one submission. Dropping it unfinished (the
/// request was abandoned) returns the session to idle.
pub(crate) struct SubmissionGuard {
    session: Session,
    _permit: OwnedMutexGuard<()>,
    finished: bool,
}

impl SubmissionGuard {
    pub(crate) fn finish(mut self, entry: HistoryEntry) {
        let mut inner = self.session.inner.write();
        inner.history.push(entry);
        inner.state = SubmissionState::Displayed;
        self.finished = true;
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.session.set_state(SubmissionState::Idle);
        }
    }
}
