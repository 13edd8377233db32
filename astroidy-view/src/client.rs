use anyhow::Context;
use astroidy_common::{AsteroidSummary, END_DATE_PARAM, SORT_PARAM, START_DATE_PARAM};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::ViewConfig;
use crate::state::FetchRequest;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request to feed proxy failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Feed proxy returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decoded proxy response body
#[derive(Debug)]
pub enum FeedBody {
    Asteroids(Vec<AsteroidSummary>),
    /// Valid JSON that is not a list, e.g. the proxy's error payload
    Other(Value),
}

/// Where the view gets its asteroid lists from
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FeedBody, ClientError>;
}

/// Decode a proxy body: arrays become asteroid lists, anything else is kept as-is
pub fn decode_body(body: &str) -> Result<FeedBody, ClientError> {
    let value: Value = serde_json::from_str(body)?;
    if value.is_array() {
        Ok(FeedBody::Asteroids(serde_json::from_value(value)?))
    } else {
        Ok(FeedBody::Other(value))
    }
}

/// HTTP client for the feed proxy
pub struct ProxyClient {
    client: Client,
    feed_url: Url,
}

impl ProxyClient {
    pub fn new(config: &ViewConfig) -> anyhow::Result<Self> {
        let raw_url = format!("{}{}", config.proxy_url, config.feed_path);
        let feed_url = Url::parse(&raw_url)
            .with_context(|| format!("Invalid feed proxy URL '{}'", raw_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("astroidy-view/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, feed_url })
    }

    pub fn request_url(&self, request: &FetchRequest) -> Url {
        let mut url = self.feed_url.clone();
        url.query_pairs_mut()
            .append_pair(START_DATE_PARAM, &request.range.start_param())
            .append_pair(END_DATE_PARAM, &request.range.end_param())
            .append_pair(SORT_PARAM, if request.sort { "true" } else { "false" });
        url
    }
}

#[async_trait]
impl FeedSource for ProxyClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<FeedBody, ClientError> {
        let body = self
            .client
            .get(self.request_url(request))
            .send()
            .await?
            .text()
            .await?;

        decode_body(&body)
    }
}
