use astroidy_common::AsteroidSummary;

/// Asteroids whose name contains `term`, ignoring case, in list order.
///
/// An empty term keeps everything.
pub fn filter_by_name<'a>(asteroids: &'a [AsteroidSummary], term: &str) -> Vec<&'a AsteroidSummary> {
    let needle = term.to_lowercase();
    asteroids
        .iter()
        .filter(|asteroid| asteroid.name.to_lowercase().contains(&needle))
        .collect()
}
