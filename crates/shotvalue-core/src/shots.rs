// Shot attempts and makes per category.

use crate::category::{CategoryMap, ShotCategory};
use crate::event::Outcome;
use crate::filter::FilteredLog;
use serde::Serialize;
use tracing::debug;

/// A classified field goal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotAttempt {
    pub category: ShotCategory,
    pub outcome: Outcome,
}

/// Attempts and makes for one category. `makes <= attempts` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ShotTally {
    pub attempts: u32,
    pub makes: u32,
}

impl ShotTally {
    pub fn record(&mut self, outcome: Outcome) {
        self.attempts += 1;
        if outcome.is_make() {
            self.makes += 1;
        }
    }

    pub fn misses(&self) -> u32 {
        self.attempts - self.makes
    }

    /// Field goal percentage as a fraction. `None` when there are no attempts.
    pub fn make_rate(&self) -> Option<f64> {
        ratio(self.makes, self.attempts)
    }
}

/// `numerator / denominator`, or `None` for a zero denominator.
pub(crate) fn ratio(numerator: u32, denominator: u32) -> Option<f64> {
    (denominator > 0).then(|| f64::from(numerator) / f64::from(denominator))
}

/// Tally every shot in the log by category.
///
/// Rows without a shot outcome are ignored. Rows with an outcome but no
/// usable distance cannot be binned and are skipped.
pub fn tally_shots(log: &FilteredLog) -> CategoryMap<ShotTally> {
    let mut tallies: CategoryMap<ShotTally> = CategoryMap::default();
    let mut incomplete = 0usize;

    for event in log {
        if event.shot_outcome.is_none() {
            continue;
        }
        match event.shot_attempt() {
            Some(attempt) => tallies[attempt.category].record(attempt.outcome),
            None => incomplete += 1,
        }
    }

    if incomplete > 0 {
        debug!(incomplete, "skipped shot rows without a usable distance");
    }
    tallies
}
