use crate::error::{Error, Result};

/// Reads a secret from the process environment.
///
/// A variable that is unset, not valid unicode, or blank is treated as
/// missing so startup can abort before anything is served.
pub fn require_secret(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingConfig(format!(
            "{} is not set. Please check your environment or .env file.",
            name
        ))),
    }
}
