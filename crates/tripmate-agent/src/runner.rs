use crate::agent::Agent;
use crate::response::AgentResponse;
use std::time::Instant;
use tracing::{info, warn};

/// Prefix of every response produced from a failed model call.
pub const ERROR_MARKER: &str = "❌ Error:";

pub struct Runner;

impl Runner {
    /// Runs one request/response cycle for `agent`.
    ///
    /// Never fails: transport, status and decoding errors come back as a
    /// response whose text starts with [`ERROR_MARKER`].
    pub async fn run(agent: &Agent, input: &str) -> AgentResponse {
        let start = Instant::now();
        info!(agent = %agent.name(), prompt_len = input.len(), "Running agent");

        let result = agent.complete(input).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(completion) => {
                info!(
                    agent = %agent.name(),
                    duration_ms,
                    tokens = completion.usage.total(),
                    finish_reason = ?completion.finish_reason,
                    "Agent run completed"
                );
                let response = AgentResponse::success(agent.name(), completion.message.content)
                    .with_usage(completion.usage)
                    .with_finish_reason(completion.finish_reason)
                    .with_duration_ms(duration_ms);
                if response.is_truncated() {
                    warn!(agent = %agent.name(), "Plan was cut off at the output token limit");
                }
                response
            }
            Err(e) => {
                warn!(agent = %agent.name(), duration_ms, error = %e, "Agent run failed");
                AgentResponse::failure(agent.name(), format!("{} {}", ERROR_MARKER, e))
                    .with_duration_ms(duration_ms)
            }
        }
    }
}
