// League-wide points per possession.
//
// Possessions are estimated from the raw log as
//
//   FGA + FT trips (excluding and-ones) + TO - live OREB
//
// where live offensive rebounds exclude end-of-period rebounds and the team
// rebounds credited after a missed free throw that is not the last of its
// trip.

use crate::error::StatsError;
use crate::event::{FinalScore, PlayEvent};
use serde::Serialize;
use tracing::debug;

/// Everything that went into one season's PPP figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PossessionSummary {
    /// Sum of home and away final scores over every game in the log.
    pub points: u64,
    /// Field goal attempts, turnovers, and first free throws of 2/3-shot trips.
    pub possession_ending_events: u64,
    /// Offensive rebounds that extend a possession rather than start one.
    pub offensive_rebounds: i64,
    pub possessions: i64,
    pub points_per_possession: f64,
}

/// Count points and possessions for a season and derive PPP.
///
/// Fails when the possession estimate is zero or negative; a log like that
/// has no meaningful per-possession rate.
pub fn points_per_possession(events: &[PlayEvent]) -> Result<PossessionSummary, StatsError> {
    let points: u64 = events
        .iter()
        .filter_map(|e| e.final_score)
        .map(FinalScore::total)
        .sum();

    let possession_ending_events = events.iter().filter(|e| ends_possession(e)).count() as u64;

    let live_orbs = events.iter().filter(|e| e.is_live_offensive_rebound()).count() as i64;
    let free_throw_orbs = events
        .iter()
        .filter(|e| e.is_non_final_free_throw_miss())
        .count() as i64;
    let offensive_rebounds = live_orbs - free_throw_orbs;

    let possessions = possession_ending_events as i64 - offensive_rebounds;
    if possessions <= 0 {
        return Err(StatsError::NonPositivePossessions { points, possessions });
    }

    let points_per_possession = points as f64 / possessions as f64;
    debug!(
        points,
        possession_ending_events,
        offensive_rebounds,
        possessions,
        points_per_possession,
        "computed points per possession"
    );

    Ok(PossessionSummary {
        points,
        possession_ending_events,
        offensive_rebounds,
        possessions,
        points_per_possession,
    })
}

fn ends_possession(event: &PlayEvent) -> bool {
    event.is_shot() || event.is_turnover() || event.free_throw.is_some_and(|ft| ft.starts_trip())
}
