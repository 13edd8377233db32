use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::feed::UpstreamClient;

/// Shared, immutable handler state
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: &ProxyConfig, api_key: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            upstream: Arc::new(UpstreamClient::new(&config.upstream, api_key)?),
        })
    }
}
