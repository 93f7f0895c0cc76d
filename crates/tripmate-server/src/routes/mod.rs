pub mod api;
pub mod health;
pub mod ui;

pub use api::{plan_api, session_history, HistoryResponse, PlanRequest, PlanResponse};
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use ui::{index, submit_plan, view_history};
