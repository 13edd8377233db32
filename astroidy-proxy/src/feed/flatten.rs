//! Decode the feed's per-date grouping and flatten it into one list
use astroidy_common::{AsteroidSummary, compare_names};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Top-level feed document; `links` and `element_count` are not needed
#[derive(Debug, Deserialize)]
pub struct FeedPayload {
    pub near_earth_objects: DateGroups,
}

/// `near_earth_objects` as `(date, asteroids)` pairs in document order
#[derive(Debug, Default)]
pub struct DateGroups(pub Vec<(String, Vec<AsteroidSummary>)>);

impl<'de> Deserialize<'de> for DateGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = DateGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from date to a list of asteroids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DateGroups, A::Error> {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((date, asteroids)) =
                    map.next_entry::<String, Vec<AsteroidSummary>>()?
                {
                    groups.push((date, asteroids));
                }
                Ok(DateGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

impl DateGroups {
    /// Number of dates in the feed window
    pub fn days(&self) -> usize {
        self.0.len()
    }

    /// Sum of every per-date list length
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, asteroids)| asteroids.len()).sum()
    }

    /// Concatenate the per-date lists in document order
    pub fn flatten(self) -> Vec<AsteroidSummary> {
        self.0
            .into_iter()
            .flat_map(|(_, asteroids)| asteroids)
            .collect()
    }
}

/// Stable sort by name
pub fn sort_by_name(asteroids: &mut [AsteroidSummary]) {
    asteroids.sort_by(|a, b| compare_names(&a.name, &b.name));
}
