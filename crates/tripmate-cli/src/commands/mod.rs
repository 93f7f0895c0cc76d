pub mod plan;
pub mod serve;

use std::path::Path;
use std::sync::Arc;
use tripmate_agent::{Agent, AgentConfig, TripPlanner};
use tripmate_core::{Config, ModelConfig};
use tripmate_llm::OpenAiProvider;

/// Reads the config file (explicit path or the default search), then applies
/// environment overrides and finally command-line overrides.
pub fn load_config(
    path: Option<&Path>,
    model: Option<String>,
    base_url: Option<String>,
) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?,
        None => Config::load_default()?,
    };

    let mut config = config.merge_env();
    if let Some(model) = model {
        config.llm.model = model;
    }
    if let Some(base_url) = base_url {
        config.llm.base_url = base_url;
    }

    Ok(config)
}

/// An explicit key wins; otherwise the variable named by `llm.api_key_env`
/// must be set.
pub fn model_config(config: &Config, api_key: Option<String>) -> anyhow::Result<ModelConfig> {
    let model = match api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => ModelConfig::new(&config.llm.model, &config.llm.base_url, key)?
            .with_request_timeout(
                config
                    .llm
                    .request_timeout_secs
                    .map(std::time::Duration::from_secs),
            ),
        None => ModelConfig::from_config(config)?,
    };
    Ok(model)
}

pub fn build_planner(config: &Config, api_key: Option<String>) -> anyhow::Result<TripPlanner> {
    let model = model_config(config, api_key)?;
    let llm = Arc::new(OpenAiProvider::from_model_config(&model)?);

    let agent = Agent::builder()
        .config(AgentConfig::travel_planner())
        .llm(llm)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create agent: {}", e))?;

    Ok(TripPlanner::new(agent))
}
