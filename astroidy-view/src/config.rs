use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Base URL of the feed proxy, without trailing slash
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    #[serde(default = "default_feed_path")]
    pub feed_path: String,

    /// Upper bound on one proxy request, so the view never stays loading forever
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_feed_path() -> String {
    "/feed".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            feed_path: default_feed_path(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl ViewConfig {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }
}
