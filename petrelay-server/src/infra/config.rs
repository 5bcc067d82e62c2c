use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

/// Largest accepted request body (10 MiB).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 1 and 65535, got {raw:?}")]
    InvalidPort { raw: String },
}

/// Server configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub body_limit: usize,
    /// Whether a `.env` file was found and applied.
    pub env_file_loaded: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            body_limit: MAX_BODY_BYTES,
            env_file_loaded: false,
        }
    }
}

impl ServerConfig {
    /// Load `.env` if present, then read `PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_file_loaded = dotenvy::dotenv().is_ok();
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.env_file_loaded = env_file_loaded;
        Ok(config)
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("PORT") {
            config.port = parse_port(&raw)?;
        }
        Ok(config)
    }

    /// Apply a CLI port override, if one was given.
    pub fn with_port_override(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort {
            raw: raw.to_string(),
        }),
    }
}
