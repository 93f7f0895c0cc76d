use serde::{Deserialize, Serialize};
use tripmate_llm::{FinishReason, TokenUsage};

/// What one runner pass produced. `text` is always displayable: either the
/// model output or the marked error description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentResponse {
    pub agent: String,
    pub text: String,
    pub is_error: bool,
    pub duration_ms: u64,
    #[serde(default)]
    pub usage: TokenUsage,
    /// Why the model stopped, when it said.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl AgentResponse {
    pub fn success(agent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            text: text.into(),
            is_error: false,
            duration_ms: 0,
            usage: TokenUsage::default(),
            finish_reason: None,
        }
    }

    pub fn failure(agent: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::success(agent, text)
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_finish_reason(mut self, reason: Option<FinishReason>) -> Self {
        self.finish_reason = reason;
        self
    }

    /// The model hit its output limit, so the plan is cut short.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason == Some(FinishReason::Length)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
