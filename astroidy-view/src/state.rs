//! View-model state record and its transitions
//!
//! Every user input and every network completion is an [`Event`];
//! [`ViewState::apply`] is the only way state changes. Transitions that
//! need data from the proxy hand back a [`FetchRequest`] for the caller to
//! run, so the whole state machine is testable without any I/O.
use astroidy_common::AsteroidSummary;
use chrono::NaiveDate;
use std::collections::HashSet;

use crate::client::{ClientError, FeedBody};
use crate::date_range::{DateRange, MAX_RANGE_DAYS, RangeError};
use crate::filter::filter_by_name;

pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch asteroids. Please check your internet connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A message the user has to see once (the page's `alert`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// One proxy request, tagged with the sequence number it was issued under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub range: DateRange,
    pub sort: bool,
}

#[derive(Debug)]
pub enum Event {
    /// The view came up; runs the initial fetch
    Mounted,
    DateRangeProposed {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    SortToggled,
    SearchChanged(String),
    ItemToggled(String),
    FetchCompleted {
        seq: u64,
        result: Result<FeedBody, ClientError>,
    },
}

#[derive(Debug, Clone)]
pub struct ViewState {
    asteroids: Vec<AsteroidSummary>,
    search_term: String,
    date_range: DateRange,
    expanded: HashSet<String>,
    loading: bool,
    sort_enabled: bool,
    /// Sequence number of the most recently issued request (0 = none yet)
    latest_seq: u64,
    notices: Vec<Notice>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_range(DateRange::today())
    }
}

impl ViewState {
    /// Fresh state whose active window is `range`
    pub fn with_range(range: DateRange) -> Self {
        Self {
            asteroids: Vec::new(),
            search_term: String::new(),
            date_range: range,
            expanded: HashSet::new(),
            loading: false,
            sort_enabled: false,
            latest_seq: 0,
            notices: Vec::new(),
        }
    }

    pub fn asteroids(&self) -> &[AsteroidSummary] {
        &self.asteroids
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sort_enabled(&self) -> bool {
        self.sort_enabled
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Label of the sort button
    pub fn sort_label(&self) -> &'static str {
        if self.sort_enabled { "Sorted" } else { "Sort" }
    }

    /// Asteroids matching the current search term, recomputed on every call
    pub fn filtered(&self) -> Vec<&AsteroidSummary> {
        filter_by_name(&self.asteroids, &self.search_term)
    }

    /// Map a 1-based row number of the filtered list, or a raw id, to an id
    pub fn resolve_item(&self, key: &str) -> Option<String> {
        let filtered = self.filtered();
        if let Ok(row) = key.parse::<usize>() {
            if (1..=filtered.len()).contains(&row) {
                return Some(filtered[row - 1].id.clone());
            }
        }
        self.asteroids
            .iter()
            .find(|asteroid| asteroid.id == key)
            .map(|asteroid| asteroid.id.clone())
    }

    /// Drain notices queued since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fold one event into the state; `Some` means a fetch must be started
    pub fn apply(&mut self, event: Event) -> Option<FetchRequest> {
        match event {
            Event::Mounted => Some(self.begin_fetch()),
            Event::DateRangeProposed { start, end } => match DateRange::from_parts(start, end) {
                Ok(range) => {
                    self.date_range = range;
                    Some(self.begin_fetch())
                }
                Err(e) => {
                    match &e {
                        RangeError::TooLong { days } => tracing::warn!(
                            "Rejected {}-day range {:?}..{:?}, limit is {}",
                            days,
                            start,
                            end,
                            MAX_RANGE_DAYS
                        ),
                        _ => tracing::warn!("Rejected date range {:?}..{:?}: {}", start, end, e),
                    }
                    self.notices.push(Notice::warning(e.to_string()));
                    None
                }
            },
            Event::SortToggled => {
                self.sort_enabled = !self.sort_enabled;
                Some(self.begin_fetch())
            }
            Event::SearchChanged(term) => {
                self.search_term = term;
                None
            }
            Event::ItemToggled(id) => {
                if !self.expanded.remove(&id) {
                    self.expanded.insert(id);
                }
                None
            }
            Event::FetchCompleted { seq, result } => {
                self.complete_fetch(seq, result);
                None
            }
        }
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.latest_seq += 1;
        self.loading = true;
        FetchRequest {
            seq: self.latest_seq,
            range: self.date_range,
            sort: self.sort_enabled,
        }
    }

    fn complete_fetch(&mut self, seq: u64, result: Result<FeedBody, ClientError>) {
        if seq != self.latest_seq {
            tracing::debug!(
                "Discarding stale response #{} (latest is #{})",
                seq,
                self.latest_seq
            );
            return;
        }

        match result {
            Ok(FeedBody::Asteroids(asteroids)) => {
                tracing::info!("Request #{} returned {} asteroids", seq, asteroids.len());
                self.asteroids = asteroids;
            }
            Ok(FeedBody::Other(body)) => {
                tracing::warn!("Request #{} returned a non-list body: {}", seq, body);
            }
            Err(e) => {
                tracing::error!("Request #{} failed: {}", seq, e);
                self.notices.push(Notice::error(FETCH_FAILED_MESSAGE));
            }
        }
        self.loading = false;
    }
}
