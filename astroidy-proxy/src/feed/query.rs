//! Allow-listed query parameters of `GET /feed`
use astroidy_common::{END_DATE_PARAM, SORT_PARAM, START_DATE_PARAM};

/// The subset of the incoming query the proxy acts on.
///
/// Anything outside `start_date`, `end_date` and `sort` is dropped here and
/// therefore can never reach the upstream request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort: bool,
}

impl FeedQuery {
    /// Build from raw `(name, value)` pairs in request order.
    ///
    /// The first occurrence of a name wins; an empty value counts as absent.
    /// `sort` is only enabled by the literal `"true"`.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };
        let present = |name: &str| {
            first(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            start_date: present(START_DATE_PARAM),
            end_date: present(END_DATE_PARAM),
            sort: first(SORT_PARAM) == Some("true"),
        }
    }
}
