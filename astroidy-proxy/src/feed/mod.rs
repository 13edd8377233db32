//! Feed aggregation
//!
//! Forwards an allow-listed query to the upstream feed, flattens its
//! per-date grouping into one list and optionally orders it by name.

pub mod flatten;
pub mod query;
pub mod upstream;

pub use flatten::{DateGroups, FeedPayload, sort_by_name};
pub use query::FeedQuery;
pub use upstream::UpstreamClient;

use astroidy_common::AsteroidSummary;

use crate::error::FeedError;

/// Fetch → flatten → (sort) one feed window
pub async fn load_feed(
    upstream: &UpstreamClient,
    query: &FeedQuery,
) -> Result<Vec<AsteroidSummary>, FeedError> {
    let groups = upstream.fetch(query).await?;
    let days = groups.days();

    let mut asteroids = groups.flatten();
    if query.sort {
        sort_by_name(&mut asteroids);
    }

    tracing::info!(
        "Feed {}..{}: {} asteroids over {} day(s), sorted={}",
        query.start_date.as_deref().unwrap_or("-"),
        query.end_date.as_deref().unwrap_or("-"),
        asteroids.len(),
        days,
        query.sort
    );

    Ok(asteroids)
}
