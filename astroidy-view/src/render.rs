//! Text rendering of the asteroid list
//!
//! [`list_view`] decides *what* is on screen (progress, empty message or
//! rows); the `Display` impls decide how it looks in a terminal.
use astroidy_common::{AsteroidSummary, CloseApproachEvent, DiameterRange};
use std::fmt;

use crate::state::ViewState;

pub const TITLE: &str = "Astroidy";
pub const EMPTY_MESSAGE: &str = "No asteroids found for the selected date range.";
pub const LOADING_MESSAGE: &str = "[==========          ] Loading asteroids...";

const COLLAPSED_MARKER: &str = "►";
const EXPANDED_MARKER: &str = "▼";

/// One row of the list
#[derive(Debug, Clone, Copy)]
pub struct ItemView<'a> {
    /// 1-based position in the filtered list
    pub row: usize,
    pub asteroid: &'a AsteroidSummary,
    pub expanded: bool,
}

#[derive(Debug, Clone)]
pub enum ListView<'a> {
    Loading,
    Empty,
    Items(Vec<ItemView<'a>>),
}

/// What the list area shows for the current state
pub fn list_view(state: &ViewState) -> ListView<'_> {
    if state.is_loading() {
        return ListView::Loading;
    }

    let filtered = state.filtered();
    if filtered.is_empty() {
        return ListView::Empty;
    }

    ListView::Items(
        filtered
            .into_iter()
            .enumerate()
            .map(|(index, asteroid)| ItemView {
                row: index + 1,
                asteroid,
                expanded: state.is_expanded(&asteroid.id),
            })
            .collect(),
    )
}

/// Whole screen: title, controls and list
pub fn render_page(state: &ViewState) -> String {
    format!(
        "{}\nSearch: \"{}\" | Range: {} | [{}]\n\n{}",
        TITLE,
        state.search_term(),
        state.date_range(),
        state.sort_label(),
        list_view(state)
    )
}

impl fmt::Display for ListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListView::Loading => writeln!(f, "{}", LOADING_MESSAGE),
            ListView::Empty => writeln!(f, "{}", EMPTY_MESSAGE),
            ListView::Items(items) => items.iter().try_for_each(|item| write!(f, "{}", item)),
        }
    }
}

impl fmt::Display for ItemView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let asteroid = self.asteroid;
        let marker = if self.expanded { EXPANDED_MARKER } else { COLLAPSED_MARKER };

        writeln!(f, "[{}] {} {}", self.row, marker, asteroid.name)?;
        if let Some(description) = asteroid.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f, "    {}", description)?;
        }
        if self.expanded {
            write_details(f, asteroid)?;
        }
        Ok(())
    }
}

fn write_details(f: &mut fmt::Formatter<'_>, asteroid: &AsteroidSummary) -> fmt::Result {
    let diameter = &asteroid.estimated_diameter;

    writeln!(f, "    NASA JPL URL: {}", asteroid.nasa_jpl_url)?;
    writeln!(f, "    Absolute Magnitude: {}", asteroid.absolute_magnitude_h)?;
    writeln!(f, "    Estimated Diameter:")?;
    write_range(f, "Kilometers", &diameter.kilometers)?;
    write_range(f, "Meters", &diameter.meters)?;
    write_range(f, "Miles", &diameter.miles)?;
    write_range(f, "Feet", &diameter.feet)?;
    writeln!(
        f,
        "    Potentially Hazardous: {}",
        yes_no(asteroid.is_potentially_hazardous_asteroid)
    )?;
    writeln!(f, "    Close Approach Data:")?;
    for approach in &asteroid.close_approach_data {
        write_approach(f, approach)?;
    }
    writeln!(f, "    Sentry Object: {}", yes_no(asteroid.is_sentry_object))
}

fn write_range(f: &mut fmt::Formatter<'_>, unit: &str, range: &DiameterRange) -> fmt::Result {
    writeln!(
        f,
        "      - {}: {} - {}",
        unit, range.estimated_diameter_min, range.estimated_diameter_max
    )
}

fn write_approach(f: &mut fmt::Formatter<'_>, approach: &CloseApproachEvent) -> fmt::Result {
    writeln!(f, "      - Date: {}", approach.close_approach_date_full)?;
    writeln!(
        f,
        "        Relative Velocity: {} km/h",
        approach.relative_velocity.kilometers_per_hour
    )?;
    writeln!(f, "        Miss Distance: {} km", approach.miss_distance.kilometers)?;
    writeln!(f, "        Orbiting Body: {}", approach.orbiting_body)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
