use crate::agent::Agent;
use crate::error::Result;
use crate::prompt::compose_prompt;
use crate::runner::Runner;
use crate::session::{HistoryEntry, Session};
use crate::trip::TripForm;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

pub const EMPTY_QUERY_WARNING: &str = "Please describe your trip.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// Nothing was sent to the model.
    Rejected { warning: String },
    /// The model was called; the entry is already in the session history.
    Planned { entry: HistoryEntry },
}

impl PlanOutcome {
    pub fn entry(&self) -> Option<&HistoryEntry> {
        match self {
            PlanOutcome::Planned { entry } => Some(entry),
            PlanOutcome::Rejected { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            PlanOutcome::Rejected { warning } => Some(warning),
            PlanOutcome::Planned { .. } => None,
        }
    }
}

/// Turns one form submission into at most one model call and records the
/// result in the submitting session.
pub struct TripPlanner {
    agent: Arc<Agent>,
}

impl TripPlanner {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub async fn submit(&self, session: &Session, form: TripForm) -> Result<PlanOutcome> {
        session.remember_form(&form);

        if !form.has_query() {
            info!(session = %session.id(), "Rejected submission without a trip description");
            return Ok(PlanOutcome::Rejected {
                warning: EMPTY_QUERY_WARNING.to_string(),
            });
        }

        let request = form.to_request()?;
        let prompt = compose_prompt(&request);
        debug!(session = %session.id(), %prompt, "Composed trip prompt");

        let guard = session.begin_submission().await;
        let response = Runner::run(&self.agent, &prompt).await;

        let entry = HistoryEntry::new(form.query, response.text).with_error(response.is_error);
        guard.finish(entry.clone());

        info!(
            session = %session.id(),
            is_error = entry.is_error,
            history = session.history_len(),
            "Trip plan recorded"
        );

        Ok(PlanOutcome::Planned { entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use crate::runner::ERROR_MARKER;
    use crate::session::SubmissionState;
    use crate::trip::{Budget, Month, TripCategory};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tripmate_core::Message;
    use tripmate_llm::{CompletionRequest, CompletionResponse, LlmError, LlmProvider};

    struct ScriptedLlm {
        fail: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedLlm {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> std::result::Result<CompletionResponse, LlmError> {
            self.prompts
                .lock()
                .unwrap()
                .push(request.messages[0].content.clone());
            if self.fail {
                Err(LlmError::api("openai", "503 Service Unavailable"))
            } else {
                Ok(CompletionResponse::new("id", "mock", Message::assistant("Day 1: Murree")))
            }
        }

        fn default_model(&self) -> &str {
            "mock"
        }
    }

    fn planner(llm: Arc<ScriptedLlm>) -> TripPlanner {
        TripPlanner::new(Agent::builder().llm(llm).build().unwrap())
    }

    fn food_form(query: &str) -> TripForm {
        TripForm {
            trip_type: TripCategory::Food,
            days: 5,
            month: Month::July,
            budget: Budget::Low,
            hint: String::new(),
            query: query.to_string(),
            dark_mode: false,
        }
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_call() {
        let llm = ScriptedLlm::new(false);
        let planner = planner(llm.clone());
        let session = Session::new();

        for query in ["", "   ", "\n\t"] {
            let outcome = planner.submit(&session, food_form(query)).await.unwrap();
            assert_eq!(outcome.warning(), Some(EMPTY_QUERY_WARNING));
        }

        assert_eq!(llm.calls(), 0);
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_success_appends_one_entry() {
        let llm = ScriptedLlm::new(false);
        let planner = planner(llm.clone());
        let session = Session::new();

        let outcome = planner.submit(&session, food_form("family trip")).await.unwrap();

        let entry = outcome.entry().unwrap();
        assert_eq!(entry.query, "family trip");
        assert_eq!(entry.response, "Day 1: Murree");
        assert!(!entry.is_error);

        assert_eq!(session.history(), vec![entry.clone()]);
        assert_eq!(session.state(), SubmissionState::Displayed);
        assert_eq!(
            llm.prompts.lock().unwrap()[0],
            "Plan a 5-day food trip in July with a low budget.  family trip Include destination \
             suggestions, daily itinerary, weather, visa guidance for Pakistani citizens, and \
             travel tips."
        );
    }

    #[tokio::test]
    async fn test_failure_still_appends_marked_entry() {
        let llm = ScriptedLlm::new(true);
        let planner = planner(llm.clone());
        let session = Session::new();

        let outcome = planner.submit(&session, food_form("family trip")).await.unwrap();

        let entry = outcome.entry().unwrap();
        assert!(entry.is_error);
        assert!(entry.response.starts_with(ERROR_MARKER));
        assert_eq!(session.history_len(), 1);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_query_is_stored_raw() {
        let planner = planner(ScriptedLlm::new(false));
        let session = Session::new();

        planner.submit(&session, food_form("  spaced out  ")).await.unwrap();

        assert_eq!(session.latest().unwrap().query, "  spaced out  ");
    }

    #[tokio::test]
    async fn test_invalid_duration_is_an_error() {
        let llm = ScriptedLlm::new(false);
        let planner = planner(llm.clone());
        let session = Session::new();

        let form = TripForm {
            days: 90,
            ..food_form("long trip")
        };
        let result = planner.submit(&session, form).await;

        assert!(matches!(result, Err(AgentError::InvalidInput(_))));
        assert_eq!(llm.calls(), 0);
        assert_eq!(session.history_len(), 0);
    }

    #[tokio::test]
    async fn test_history_grows_in_submission_order() {
        let planner = planner(ScriptedLlm::new(false));
        let session = Session::new();

        for query in ["one", "two", "three"] {
            planner.submit(&session, food_form(query)).await.unwrap();
        }

        let recent: Vec<_> = session
            .history_recent_first()
            .into_iter()
            .map(|e| e.query)
            .collect();
        assert_eq!(recent, vec!["three", "two", "one"]);
        assert_eq!(session.history()[0].query, "one");
    }
}
