use super::env::require_secret;
use super::types::Config;
use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Everything the model client needs, resolved once at startup.
#[derive(Clone)]
pub struct ModelConfig {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub request_timeout: Option<Duration>,
}

impl ModelConfig {
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|source| Error::InvalidBaseUrl {
                url: base_url.clone(),
                source,
            })?;

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingConfig("API key is empty".to_string()));
        }

        Ok(Self {
            model: model.into(),
            base_url,
            api_key,
            request_timeout: None,
        })
    }

    /// Resolves the API key from the variable named in `config.llm.api_key_env`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = require_secret(&config.llm.api_key_env)?;
        Self::new(&config.llm.model, &config.llm.base_url, api_key).map(|model| {
            model.with_request_timeout(config.llm.request_timeout_secs.map(Duration::from_secs))
        })
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
