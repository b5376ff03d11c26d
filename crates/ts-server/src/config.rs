//! Server configuration, read from the environment once at startup.

use std::net::SocketAddr;
use thiserror::Error;

pub const ADDR_VAR: &str = "TASK_SUGGEST_ADDR";
pub const UPSTREAM_FAILURES_VAR: &str = "TASK_SUGGEST_UPSTREAM_FAILURES";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_UPSTREAM_FAILURES: u32 = 2;

/// Used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "ts_server=info,ts_runner=info,tower_http=info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}='{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Simulated upstream failures before the first success.
    pub upstream_failures: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            upstream_failures: DEFAULT_UPSTREAM_FAILURES,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: ADDR_VAR,
                value: addr.clone(),
                reason: e.to_string(),
            })?;

        let upstream_failures = match lookup(UPSTREAM_FAILURES_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::Invalid {
                    var: UPSTREAM_FAILURES_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_UPSTREAM_FAILURES,
        };

        Ok(Self {
            addr,
            upstream_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (ADDR_VAR, "0.0.0.0:9000"),
            (UPSTREAM_FAILURES_VAR, " 0 "),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.upstream_failures, 0);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ServerConfig::from_lookup(lookup_from(&[(ADDR_VAR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains(ADDR_VAR));

        let err =
            ServerConfig::from_lookup(lookup_from(&[(UPSTREAM_FAILURES_VAR, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var, .. } if var == UPSTREAM_FAILURES_VAR));
    }
}
