use crate::error::Result;
use minijinja::Environment;
use serde::Serialize;
use tripmate_agent::{
    Budget, HistoryEntry, Month, Session, SubmissionState, TripCategory, TripDuration, TripForm,
};

const INDEX_TEMPLATE: &str = "index.html";

/// Compiled page templates. Autoescaping is on for `.html` names.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render_page(&self, view: &PageView) -> Result<String> {
        let template = self.env.get_template(INDEX_TEMPLATE)?;
        Ok(template.render(view)?)
    }
}

/// One row in the past plans sidebar.
#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub position: usize,
    pub preview: String,
    pub time: String,
    pub is_error: bool,
}

/// Everything the page template reads.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub categories: Vec<&'static str>,
    pub months: Vec<&'static str>,
    pub budgets: Vec<&'static str>,
    pub days_min: u32,
    pub days_max: u32,
    pub form: TripForm,
    pub dark_mode: bool,
    pub pending: bool,
    pub history: Vec<HistoryItem>,
    pub viewed: Option<HistoryEntry>,
    pub result: Option<HistoryEntry>,
    pub warning: Option<String>,
}

impl PageView {
    pub fn for_session(session: &Session) -> Self {
        let history = session
            .history_recent_first()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| HistoryItem {
                position: i + 1,
                preview: entry.preview(),
                time: entry.created_at.display_time(),
                is_error: entry.is_error,
            })
            .collect();

        Self {
            categories: TripCategory::labels().collect(),
            months: Month::labels().collect(),
            budgets: Budget::labels().collect(),
            days_min: TripDuration::MIN,
            days_max: TripDuration::MAX,
            form: session.last_form().unwrap_or_default(),
            dark_mode: session.dark_mode(),
            pending: session.state() == SubmissionState::Pending,
            history,
            viewed: session.viewed(),
            result: None,
            warning: None,
        }
    }

    pub fn with_result(mut self, entry: HistoryEntry) -> Self {
        self.result = Some(entry);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}
