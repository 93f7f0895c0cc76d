use super::types::{Config, LogLevel};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn load_default() -> Result<Self> {
        let paths = ["./tripmate.toml", "~/.config/tripmate/config.toml"];

        for path in &paths {
            let expanded = shellexpand::tilde(path);
            let path = Path::new(expanded.as_ref());
            if path.exists() {
                debug!(path = %path.display(), "Loading config file");
                return Self::load_from_file(path);
            }
        }

        Ok(Config::default())
    }

    pub fn merge_env(mut self) -> Self {
        if let Ok(level) = std::env::var("TRIPMATE_LOG_LEVEL") {
            self.general.log_level = LogLevel::parse(&level).unwrap_or(self.general.log_level);
        }

        if let Ok(model) = std::env::var("TRIPMATE_MODEL") {
            if !model.trim().is_empty() {
                self.llm.model = model;
            }
        }

        if let Ok(base_url) = std::env::var("TRIPMATE_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.llm.base_url = base_url;
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, LogLevel::Info);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.llm.api_key_env, DEFAULT_API_KEY_ENV);
        assert!(config.llm.request_timeout_secs.is_none());
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.session_idle_secs, 3600);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [general]
            log_level = "debug"

            [llm]
            model = "gemini-2.0-flash"
            request_timeout_secs = 90

            [server]
            port = 9000
            session_idle_secs = 600
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.general.log_level, LogLevel::Debug);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.llm.request_timeout_secs, Some(90));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.session_idle_secs, 600);
    }

    #[test]
    fn test_config_from_invalid_toml() {
        let err = Config::from_toml("[llm\nmodel = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\nbase_url = \"http://localhost:4000/v1\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.llm.base_url, "http://localhost:4000/v1");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigFile { .. }));
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
