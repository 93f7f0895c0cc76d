pub mod agent;
pub mod config;
pub mod error;
pub mod planner;
pub mod prompt;
pub mod response;
pub mod runner;
pub mod session;
pub mod trip;

pub use agent::{Agent, AgentBuilder};
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use planner::{PlanOutcome, TripPlanner, EMPTY_QUERY_WARNING};
pub use prompt::compose_prompt;
pub use response::AgentResponse;
pub use runner::{Runner, ERROR_MARKER};
pub use session::{HistoryEntry, Session, SubmissionState};
pub use trip::{Budget, Month, TripCategory, TripDuration, TripForm, TripRequest};

pub mod prelude {
    pub use crate::agent::{Agent, AgentBuilder};
    pub use crate::config::AgentConfig;
    pub use crate::error::{AgentError, Result};
    pub use crate::planner::{PlanOutcome, TripPlanner, EMPTY_QUERY_WARNING};
    pub use crate::prompt::compose_prompt;
    pub use crate::response::AgentResponse;
    pub use crate::runner::{Runner, ERROR_MARKER};
    pub use crate::session::{HistoryEntry, Session, SubmissionState};
    pub use crate::trip::{Budget, Month, TripCategory, TripDuration, TripForm, TripRequest};
}
