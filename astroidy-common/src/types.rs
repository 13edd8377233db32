use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query parameter carrying the first day of the requested window
pub const START_DATE_PARAM: &str = "start_date";
/// Query parameter carrying the last day of the requested window
pub const END_DATE_PARAM: &str = "end_date";
/// Query parameter switching on name ordering
pub const SORT_PARAM: &str = "sort";

/// Wire format of every calendar date exchanged with the proxy and the feed
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The only message the proxy ever returns on failure
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

/// Min/max pair for one unit system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// Estimated diameter expressed in the four unit systems the feed reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
    pub meters: DiameterRange,
    pub miles: DiameterRange,
    pub feet: DiameterRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    /// String-encoded km/h, e.g. "48321.8807423341"
    pub kilometers_per_hour: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    /// String-encoded kilometers
    pub kilometers: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One close approach of an asteroid to an orbiting body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproachEvent {
    /// Full date-time, e.g. "2024-Jan-01 14:52"
    pub close_approach_date_full: String,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    pub orbiting_body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A near-Earth object as listed by the feed.
///
/// Only the fields the list view shows are typed. Everything else the feed
/// sends (`links`, `neo_reference_id`, ...) lands in `extra` and is written
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSummary {
    pub id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    pub absolute_magnitude_h: f64,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    pub close_approach_data: Vec<CloseApproachEvent>,
    pub is_sentry_object: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Uniform error payload returned by the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn generic() -> Self {
        Self {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
