use serde::Deserialize;

/// Server start configuration.
///
/// Loadable from environment variables (`ServerConfig::load`) or from a
/// YAML document (`ServerConfig::from_yaml` / `ServerConfig::from_file`).
/// Handlers, routers and shared state are wired programmatically on
/// [`crate::server::Server`].
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, e.g. "127.0.0.1".
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Enables per-connection trace logging; silent when false.
    #[serde(default)]
    pub log_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_enabled: false,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `LOG_ENABLED` from the environment,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn load() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_port);
        let log_enabled = std::env::var("LOG_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self {
            host,
            port,
            log_enabled,
        }
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
