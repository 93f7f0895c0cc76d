use std::path::PathBuf;
use thiserror::Error;

/// Failures while assembling configuration at startup. All of them are
/// fatal: nothing is served until they are fixed.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::MissingConfig("GEMINI_API_KEY is not set.".into());
        assert_eq!(err.to_string(), "Missing required config: GEMINI_API_KEY is not set.");

        let err = Error::ConfigFile {
            path: PathBuf::from("/etc/tripmate.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/etc/tripmate.toml"));
    }
}
