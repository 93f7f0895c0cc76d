use thiserror::Error;
use tripmate_llm::LlmError;

#[derive(Error, Debug)]
pub enum AgentError {
    /// The agent could not be assembled.
    #[error("Agent configuration error: {0}")]
    Config(String),

    /// A form value outside the accepted choices or range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `View n` pointed past the end of the session history.
    #[error("No past plan at position {0}")]
    HistoryNotFound(usize),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
