use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use std::sync::Arc;
use tripmate_llm::{CompletionRequest, CompletionResponse, LlmProvider};

/// A fixed system instruction bound to a model client.
pub struct Agent {
    config: AgentConfig,
    llm: Arc<dyn LlmProvider>,
}

impl Agent {
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    pub async fn complete(&self, prompt: &str) -> Result<CompletionResponse> {
        let request = self.build_request(prompt);
        Ok(self.llm.complete(request).await?)
    }

    fn build_request(&self, prompt: &str) -> CompletionRequest {
        let mut request = CompletionRequest::single_turn(
            self.llm.default_model(),
            &self.config.instruction,
            prompt,
        );

        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        request
    }
}

#[derive(Default)]
pub struct AgentBuilder {
    config: Option<AgentConfig>,
    name: Option<String>,
    instruction: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    llm: Option<Arc<dyn LlmProvider>>,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn build(self) -> Result<Agent> {
        let llm = self.llm.ok_or_else(|| AgentError::config("LLM provider is required"))?;

        let mut config = self.config.unwrap_or_default();

        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(instruction) = self.instruction {
            config.instruction = instruction;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = Some(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = Some(max_tokens);
        }

        if config.instruction.trim().is_empty() {
            return Err(AgentError::config("Agent instruction must not be empty"));
        }

        Ok(Agent { config, llm })
    }
}
