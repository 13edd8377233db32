use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the upstream credential.
///
/// The key is never part of [`ProxyConfig`], so the config can be logged freely.
pub const API_KEY_ENV: &str = "NASA_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Allow cross-origin GETs (the page is normally served same-origin)
    #[serde(default)]
    pub enable_cors: bool,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_host")]
    pub host: String,

    #[serde(default = "default_feed_path")]
    pub feed_path: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_upstream_host() -> String {
    "https://api.nasa.gov".to_string()
}

fn default_feed_path() -> String {
    "/neo/rest/v1/feed".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host: default_upstream_host(),
            feed_path: default_feed_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            enable_cors: false,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read the upstream credential; blank values count as unset
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ProxyConfig::from_toml("").unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.log_level, "info");
        assert!(!config.enable_cors);
        assert_eq!(config.upstream.host, "https://api.nasa.gov");
        assert_eq!(config.upstream.feed_path, "/neo/rest/v1/feed");
        assert_eq!(config.upstream.timeout_secs, 30);
    }

    #[test]
    fn test_partial_upstream_section() {
        let config = ProxyConfig::from_toml(
            r#"
            port = 8080

            [upstream]
            host = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream.host, "http://127.0.0.1:9000");
        assert_eq!(config.upstream.feed_path, "/neo/rest/v1/feed");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ProxyConfig::load("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ProxyConfig::from_toml("port = \"many\"").is_err());
    }
}
