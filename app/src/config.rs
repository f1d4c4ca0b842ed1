//! Server configuration loaded from the environment.

use std::{env, str::FromStr, time::Duration};

use crate::core::ROUND_RESET_DELAY_MS;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default bind port
pub const DEFAULT_PORT: u16 = 8081;

const HOST_ENV: &str = "HOST";
const PORT_ENV: &str = "PORT";
const ROUND_RESET_DELAY_ENV: &str = "ROUND_RESET_DELAY_MS";

/// Runtime settings for the server binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
    /// Delay before a finished round is cleared
    pub round_reset_delay: Duration,
}

impl ServerConfig {
    /// Load settings from process environment variables
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    ///
    /// Missing keys use the defaults; unparseable values are logged and
    /// also fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or_default(&lookup, PORT_ENV, DEFAULT_PORT);
        let delay_ms = parse_or_default(&lookup, ROUND_RESET_DELAY_ENV, ROUND_RESET_DELAY_MS);

        Self {
            host,
            port,
            round_reset_delay: Duration::from_millis(delay_ms),
        }
    }

    /// Address string suitable for `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            round_reset_delay: Duration::from_millis(ROUND_RESET_DELAY_MS),
        }
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value {:?} for {}; using {:?}", raw, key, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.round_reset_delay, Duration::from_millis(5000));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("ROUND_RESET_DELAY_MS", "250"),
        ]));

        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.round_reset_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("HOST", "   "),
            ("PORT", "not-a-port"),
            ("ROUND_RESET_DELAY_MS", "-5"),
        ]));

        assert_eq!(config, ServerConfig::default());
    }
}
