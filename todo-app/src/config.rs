//! Server binding configuration.
//!
//! Defaults to all interfaces on port 8080. `TODO_HOST` and `TODO_PORT`
//! override either part.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const HOST_VAR: &str = "TODO_HOST";
pub const PORT_VAR: &str = "TODO_PORT";

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid IP address: {value:?}")]
    InvalidHost { var: &'static str, value: String },

    #[error("{var} is not a valid port: {value:?}")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read overrides through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(HOST_VAR) {
            config.host = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost {
                    var: HOST_VAR,
                    value,
                })?;
        }
        if let Some(value) = lookup(PORT_VAR) {
            config.port = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value,
                })?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_to_all_interfaces_on_8080() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_overrides() {
        let config =
            Config::from_lookup(lookup(&[("TODO_HOST", "127.0.0.1"), ("TODO_PORT", "3000")]))
                .unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn rejects_invalid_port() {
        let err = Config::from_lookup(lookup(&[("TODO_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                var: "TODO_PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn rejects_invalid_host() {
        let err = Config::from_lookup(lookup(&[("TODO_HOST", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHost { .. }));
    }
}
