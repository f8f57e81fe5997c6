// Per-season analysis: runs every calculation over one season's log.

use crate::category::CategoryMap;
use crate::error::StatsError;
use crate::event::PlayEvent;
use crate::expected::{
    expected_points, expected_points_with_rebounds, rebound_rate, rebound_rate_of_misses,
};
use crate::filter::{filter_events, TeamFilter};
use crate::possession::{points_per_possession, PossessionSummary};
use crate::rebounds::tally_rebounds;
use crate::shots::{tally_shots, ShotTally};
use serde::Serialize;
use std::fmt;
use tracing::info;

// ---------------------------------------------------------------------------
// Season identity
// ---------------------------------------------------------------------------

/// An NBA season, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Season {
    pub start_year: u16,
}

impl Season {
    pub fn new(start_year: u16) -> Self {
        Season { start_year }
    }

    /// Label such as "2019-2020".
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_year, u32::from(self.start_year) + 1)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Derived metrics for one shot category in one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySummary {
    pub attempts: u32,
    pub makes: u32,
    pub misses: u32,
    pub offensive_rebounds: u32,
    pub make_rate: Option<f64>,
    /// Offensive rebounds per attempt.
    pub rebound_rate: Option<f64>,
    /// Offensive rebounds per miss.
    pub rebound_rate_of_misses: Option<f64>,
    pub expected_points: Option<f64>,
    pub expected_points_with_rebounds: Option<f64>,
}

/// Everything computed for one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    pub season: Season,
    pub label: String,
    pub possessions: PossessionSummary,
    pub categories: CategoryMap<CategorySummary>,
}

impl SeasonReport {
    pub fn total_attempts(&self) -> u32 {
        self.categories.values().map(|c| c.attempts).sum()
    }

    pub fn total_offensive_rebounds(&self) -> u32 {
        self.categories.values().map(|c| c.offensive_rebounds).sum()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Analyze one season's log.
///
/// PPP is always computed league-wide from the full log; the team filter
/// only scopes the shot and rebound tallies.
pub fn analyze(
    season: Season,
    events: &[PlayEvent],
    team: &TeamFilter,
) -> Result<SeasonReport, StatsError> {
    let possessions = points_per_possession(events)?;
    let log = filter_events(events, team);
    let shots = tally_shots(&log);
    let rebounds = tally_rebounds(&log);

    let report = SeasonReport {
        season,
        label: season.label(),
        possessions,
        categories: summarize(
            &shots,
            &rebounds,
            possessions.points_per_possession,
        ),
    };

    info!(
        season = %season,
        team = team.label(),
        ppp = possessions.points_per_possession,
        attempts = report.total_attempts(),
        offensive_rebounds = report.total_offensive_rebounds(),
        "season analyzed"
    );
    Ok(report)
}

/// Combine shot and rebound tallies into per-category metrics.
pub fn summarize(
    shots: &CategoryMap<ShotTally>,
    rebounds: &CategoryMap<u32>,
    points_per_possession: f64,
) -> CategoryMap<CategorySummary> {
    let plain = expected_points(shots);
    let with_rebounds = expected_points_with_rebounds(shots, rebounds, points_per_possession);

    shots.map(|category, tally| {
        let orbs = rebounds[category];
        CategorySummary {
            attempts: tally.attempts,
            makes: tally.makes,
            misses: tally.misses(),
            offensive_rebounds: orbs,
            make_rate: tally.make_rate(),
            rebound_rate: rebound_rate(tally, orbs),
            rebound_rate_of_misses: rebound_rate_of_misses(tally, orbs),
            expected_points: plain[category],
            expected_points_with_rebounds: with_rebounds[category],
        }
    })
}
