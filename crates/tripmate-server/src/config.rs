use crate::error::{Result, ServerError};
use std::net::SocketAddr;
use std::time::Duration;
use tripmate_core::config::ServerSettings;

/// Where the planner listens. Defaults match `[server]` in the config file.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// An IP literal or a hostname such as `localhost`.
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the JSON API. Empty means any.
    pub cors_origins: Vec<String>,
    pub session_idle: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSettings::default())
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            cors_origins: Vec::new(),
            session_idle: Duration::from_secs(settings.session_idle_secs),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }

    pub fn with_session_idle(mut self, idle: Duration) -> Self {
        self.session_idle = idle;
        self
    }

    /// `host:port` as configured, for display.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the host through the system resolver and returns the first
    /// address.
    pub async fn resolve(&self) -> Result<SocketAddr> {
        let mut addrs = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                ServerError::internal(format!("Cannot resolve {}: {}", self.listen_address(), e))
            })?;

        addrs.next().ok_or_else(|| {
            ServerError::internal(format!("No address found for {}", self.listen_address()))
        })
    }
}
