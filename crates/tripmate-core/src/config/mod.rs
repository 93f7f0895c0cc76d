mod env;
mod loader;
mod model;
mod types;

pub use env::require_secret;
pub use model::ModelConfig;
pub use types::{
    Config, GeneralConfig, LlmSettings, LogLevel, ServerSettings, DEFAULT_API_KEY_ENV,
    DEFAULT_BASE_URL, DEFAULT_MODEL,
};
