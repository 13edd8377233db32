//! HTTP client for the space-agency feed
use anyhow::Context;
use astroidy_common::{END_DATE_PARAM, START_DATE_PARAM};
use reqwest::{Client, Url};
use std::time::Duration;

use super::flatten::{DateGroups, FeedPayload};
use super::query::FeedQuery;
use crate::config::UpstreamConfig;
use crate::error::FeedError;

const API_KEY_PARAM: &str = "api_key";

/// Owns the credential and the pooled HTTP client; cheap to share behind `Arc`.
pub struct UpstreamClient {
    client: Client,
    feed_url: Url,
    api_key: Option<String>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig, api_key: Option<String>) -> anyhow::Result<Self> {
        let raw_url = format!("{}{}", config.host, config.feed_path);
        let feed_url = Url::parse(&raw_url)
            .with_context(|| format!("Invalid upstream feed URL '{}'", raw_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("astroidy-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            feed_url,
            api_key,
        })
    }

    /// Outbound URL for one feed request.
    ///
    /// Carries `api_key` (empty when unconfigured) and whichever of
    /// `start_date`/`end_date` the caller supplied, each under its own name.
    pub fn feed_url(&self, query: &FeedQuery) -> Url {
        let mut url = self.feed_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(API_KEY_PARAM, self.api_key.as_deref().unwrap_or(""));
            if let Some(start) = &query.start_date {
                pairs.append_pair(START_DATE_PARAM, start);
            }
            if let Some(end) = &query.end_date {
                pairs.append_pair(END_DATE_PARAM, end);
            }
        }
        url
    }

    /// Fetch and decode one feed window
    pub async fn fetch(&self, query: &FeedQuery) -> Result<DateGroups, FeedError> {
        tracing::debug!(
            "Requesting feed window {:?}..{:?}",
            query.start_date,
            query.end_date
        );

        let response = self.client.get(self.feed_url(query)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        let payload: FeedPayload = serde_json::from_str(&body)?;

        Ok(payload.near_earth_objects)
    }
}
