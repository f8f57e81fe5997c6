// Reduction of a raw play-by-play log to its shooting and rebounding rows.

use crate::category::ShotCategory;
use crate::event::{Outcome, PlayEvent, ReboundType};
use crate::shots::ShotAttempt;
use serde::Serialize;
use tracing::debug;

/// Minimum number of populated shot/rebound fields a row needs to survive
/// filtering.
const MIN_POPULATED_FIELDS: usize = 2;

// ---------------------------------------------------------------------------
// Team scope
// ---------------------------------------------------------------------------

/// Which rows to keep when filtering by team.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    /// League-wide: keep every qualifying row.
    #[default]
    All,
    /// Keep rows whose shooter or rebounder contains this token.
    Team(String),
}

impl TeamFilter {
    /// Parse a team scope. `"ALL"` (any case) or an empty string means
    /// league-wide.
    pub fn parse(s: &str) -> Self {
        let token = s.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("all") {
            TeamFilter::All
        } else {
            TeamFilter::Team(token.to_string())
        }
    }

    /// Human-readable scope label.
    pub fn label(&self) -> &str {
        match self {
            TeamFilter::All => "ALL",
            TeamFilter::Team(token) => token,
        }
    }

    fn accepts(&self, event: &FilteredEvent) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(token) => {
                let contains = |field: &Option<String>| {
                    field.as_deref().is_some_and(|name| name.contains(token.as_str()))
                };
                contains(&event.shooter) || contains(&event.rebounder)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered rows
// ---------------------------------------------------------------------------

/// A play-by-play row reduced to its shot and rebound columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredEvent {
    /// Carried through for game-boundary checks; not one of the counted
    /// columns.
    pub game_id: Option<String>,
    pub shooter: Option<String>,
    pub shot_type: Option<String>,
    pub shot_outcome: Option<Outcome>,
    pub shot_distance: Option<f64>,
    pub rebounder: Option<String>,
    pub rebound_type: Option<ReboundType>,
    pub seconds_left: Option<u32>,
}

impl FilteredEvent {
    fn from_event(event: &PlayEvent) -> Self {
        FilteredEvent {
            game_id: event.game_id.clone(),
            shooter: event.shooter.clone(),
            shot_type: event.shot_type.clone(),
            shot_outcome: event.shot_outcome,
            shot_distance: event.shot_distance,
            rebounder: event.rebounder.clone(),
            rebound_type: event.rebound_type,
            seconds_left: event.seconds_left,
        }
    }

    /// Number of the seven shot/rebound columns that carry a value.
    pub fn populated_fields(&self) -> usize {
        [
            self.shooter.is_some(),
            self.shot_type.is_some(),
            self.shot_outcome.is_some(),
            self.shot_distance.is_some(),
            self.rebounder.is_some(),
            self.rebound_type.is_some(),
            self.seconds_left.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// The shot this row records, if it has an outcome and a usable
    /// distance.
    pub fn shot_attempt(&self) -> Option<ShotAttempt> {
        let outcome = self.shot_outcome?;
        let distance = self.shot_distance.filter(|d| d.is_finite() && *d >= 0.0)?;
        Some(ShotAttempt {
            category: ShotCategory::classify(self.shot_type.as_deref(), distance),
            outcome,
        })
    }

    /// Offensive rebound recorded with time still on the clock.
    pub fn is_live_offensive_rebound(&self) -> bool {
        self.rebound_type == Some(ReboundType::Offensive) && self.seconds_left != Some(0)
    }
}

// ---------------------------------------------------------------------------
// Ordered log
// ---------------------------------------------------------------------------

/// Filtered rows in the chronological order of the source log.
///
/// Rebound attribution looks at the row immediately after each miss, so the
/// order here must match the log. Reordering the rows
/// silently changes which rebounds are credited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredLog {
    events: Vec<FilteredEvent>,
}

impl FilteredLog {
    /// Wrap rows that are already in source order.
    pub fn from_ordered(events: Vec<FilteredEvent>) -> Self {
        FilteredLog { events }
    }

    pub fn events(&self) -> &[FilteredEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilteredEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilteredLog {
    type Item = &'a FilteredEvent;
    type IntoIter = std::slice::Iter<'a, FilteredEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Keep the rows that carry shot or rebound information, optionally scoped
/// to one team. Source order is preserved.
pub fn filter_events(events: &[PlayEvent], team: &TeamFilter) -> FilteredLog {
    let kept: Vec<FilteredEvent> = events
        .iter()
        .map(FilteredEvent::from_event)
        .filter(|event| event.populated_fields() >= MIN_POPULATED_FIELDS)
        .filter(|event| team.accepts(event))
        .collect();

    debug!(
        total = events.len(),
        kept = kept.len(),
        team = team.label(),
        "filtered play-by-play rows"
    );

    FilteredLog::from_ordered(kept)
}
