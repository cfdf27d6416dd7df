//! Service configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Check-ip service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Blocklist file, one IP per line.
    #[serde(default = "default_blocklist_path")]
    pub blocklist_path: PathBuf,

    /// Directory served under `/static`. Not served when unset.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5000
}

fn default_blocklist_path() -> PathBuf {
    PathBuf::from("ip_blacklist.txt")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            blocklist_path: default_blocklist_path(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `HOST` | Listen address (default `0.0.0.0`) |
    /// | `PORT` | Listen port (default `5000`) |
    /// | `IPGATE_BLOCKLIST_FILE` | Blocklist path (default `ip_blacklist.txt`) |
    /// | `IPGATE_STATIC_DIR` | Static files directory |
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = env_var("HOST") {
            config.host = raw.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidVar {
                    var: "HOST",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(raw) = env_var("PORT") {
            config.port = raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidVar {
                    var: "PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(raw) = env_var("IPGATE_BLOCKLIST_FILE") {
            config.blocklist_path = PathBuf::from(raw);
        }

        config.static_dir = env_var("IPGATE_STATIC_DIR").map(PathBuf::from);

        Ok(config)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_blocklist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.blocklist_path = path.into();
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
