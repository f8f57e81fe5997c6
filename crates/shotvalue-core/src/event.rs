// Play-by-play event model.
//
// One `PlayEvent` per row of a season's play-by-play log. Rows are sparse:
// only the fields belonging to the kind of play that row describes are
// populated, everything else is `None`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Outcomes and labels
// ---------------------------------------------------------------------------

/// Result of a field goal or free throw attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Make,
    Miss,
}

impl Outcome {
    /// Parse a play-by-play outcome label ("make" / "miss").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "make" => Some(Outcome::Make),
            "miss" => Some(Outcome::Miss),
            _ => None,
        }
    }

    pub fn is_make(self) -> bool {
        self == Outcome::Make
    }
}

/// Rebound classification as recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReboundType {
    Offensive,
    Defensive,
    /// Any other label the log carries.
    Other,
}

impl ReboundType {
    /// Parse a rebound type label. Unrecognized non-empty labels map to `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "offensive" => ReboundType::Offensive,
            "defensive" => ReboundType::Defensive,
            _ => ReboundType::Other,
        }
    }
}

/// Position of a free throw within its trip, e.g. "2 of 3".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeThrowSequence {
    pub attempt: u8,
    pub total: u8,
}

impl FreeThrowSequence {
    /// Parse an `"N of M"` label. Anything else (technicals, flagrants with
    /// extra words, malformed text) yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let attempt = parts.next()?.parse::<u8>().ok()?;
        if parts.next()? != "of" {
            return None;
        }
        let total = parts.next()?.parse::<u8>().ok()?;
        if parts.next().is_some() || attempt == 0 || attempt > total {
            return None;
        }
        Some(FreeThrowSequence { attempt, total })
    }

    /// First attempt of a two- or three-shot trip. And-ones ("1 of 1") do
    /// not start a possession-ending trip.
    pub fn starts_trip(self) -> bool {
        self.attempt == 1 && (2..=3).contains(&self.total)
    }

    /// Whether more free throws follow this one in the same trip.
    pub fn is_final(self) -> bool {
        self.attempt == self.total
    }
}

impl fmt::Display for FreeThrowSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.attempt, self.total)
    }
}

/// Final score carried by a game's end-of-game sentinel row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub home: u32,
    pub away: u32,
}

impl FinalScore {
    pub fn total(self) -> u64 {
        u64::from(self.home) + u64::from(self.away)
    }
}

// ---------------------------------------------------------------------------
// Event record
// ---------------------------------------------------------------------------

/// A single play-by-play row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    /// Identity of the game this row belongs to, when the log carries one.
    pub game_id: Option<String>,
    pub seconds_left: Option<u32>,

    pub shooter: Option<String>,
    pub shot_type: Option<String>,
    pub shot_outcome: Option<Outcome>,
    /// Shot distance in feet.
    pub shot_distance: Option<f64>,

    pub rebounder: Option<String>,
    pub rebound_type: Option<ReboundType>,

    pub turnover_type: Option<String>,

    pub free_throw: Option<FreeThrowSequence>,
    pub free_throw_outcome: Option<Outcome>,

    /// Set only on the end-of-game sentinel row.
    pub final_score: Option<FinalScore>,
}

impl PlayEvent {
    /// Field goal attempt, made or missed.
    pub fn is_shot(&self) -> bool {
        self.shooter.is_some() || self.shot_outcome.is_some()
    }

    pub fn is_turnover(&self) -> bool {
        self.turnover_type.is_some()
    }

    /// Offensive rebound that extends the possession. Rebounds recorded with
    /// zero seconds left are end-of-period bookkeeping and never start a new
    /// possession.
    pub fn is_live_offensive_rebound(&self) -> bool {
        self.rebound_type == Some(ReboundType::Offensive) && self.seconds_left != Some(0)
    }

    /// Missed free throw that is not the last attempt of its trip.
    pub fn is_non_final_free_throw_miss(&self) -> bool {
        self.free_throw_outcome == Some(Outcome::Miss)
            && self.free_throw.is_some_and(|ft| !ft.is_final())
    }
}

// ---------------------------------------------------------------------------
// Test builders
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    // -- Label parsing --

    #[test]
    fn outcome_parse_is_case_insensitive() {
        assert_eq!(Outcome::parse("make"), Some(Outcome::Make));
        assert_eq!(Outcome::parse(" MISS "), Some(Outcome::Miss));
        assert_eq!(Outcome::parse("blocked"), None);
    }

    #[test]
    fn rebound_type_unknown_is_other() {
        assert_eq!(ReboundType::parse("offensive"), ReboundType::Offensive);
        assert_eq!(ReboundType::parse("Defensive"), ReboundType::Defensive);
        assert_eq!(ReboundType::parse("team"), ReboundType::Other);
    }

    #[test]
    fn free_throw_sequence_parse() {
        assert_eq!(
            FreeThrowSequence::parse("2 of 3"),
            Some(FreeThrowSequence { attempt: 2, total: 3 })
        );
        assert_eq!(FreeThrowSequence::parse("technical"), None);
        assert_eq!(FreeThrowSequence::parse("flagrant 1 of 2"), None);
        assert_eq!(FreeThrowSequence::parse("3 of 2"), None);
        assert_eq!(FreeThrowSequence::parse("1 of 2 extra"), None);
    }

    #[test]
    fn free_throw_trip_boundaries() {
        let one_of_one = FreeThrowSequence::parse("1 of 1").unwrap();
        let one_of_two = FreeThrowSequence::parse("1 of 2").unwrap();
        let one_of_three = FreeThrowSequence::parse("1 of 3").unwrap();
        let two_of_two = FreeThrowSequence::parse("2 of 2").unwrap();

        assert!(!one_of_one.starts_trip());
        assert!(one_of_two.starts_trip());
        assert!(one_of_three.starts_trip());
        assert!(!two_of_two.starts_trip());

        assert!(one_of_one.is_final());
        assert!(!one_of_two.is_final());
        assert!(two_of_two.is_final());
        assert_eq!(one_of_three.to_string(), "1 of 3");
    }

    // -- Event predicates --

    #[test]
    fn end_of_period_rebound_is_not_live() {
        assert!(rebound(ReboundType::Offensive, 45).is_live_offensive_rebound());
        assert!(!rebound(ReboundType::Offensive, 0).is_live_offensive_rebound());
        assert!(!rebound(ReboundType::Defensive, 45).is_live_offensive_rebound());
    }

    #[test]
    fn rebound_without_clock_is_live() {
        let mut event = rebound(ReboundType::Offensive, 10);
        event.seconds_left = None;
        assert!(event.is_live_offensive_rebound());
    }

    #[test]
    fn non_final_free_throw_miss() {
        assert!(free_throw("1 of 2", Outcome::Miss).is_non_final_free_throw_miss());
        assert!(free_throw("2 of 3", Outcome::Miss).is_non_final_free_throw_miss());
        assert!(!free_throw("2 of 2", Outcome::Miss).is_non_final_free_throw_miss());
        assert!(!free_throw("1 of 2", Outcome::Make).is_non_final_free_throw_miss());
    }

    #[test]
    fn final_score_total() {
        let event = end_of_game(110, 98);
        assert_eq!(event.final_score.map(FinalScore::total), Some(208));
        assert!(!event.is_shot());
        assert!(shot("2-pt layup", Outcome::Make, 1.0).is_shot());
        assert!(turnover().is_turnover());
    }
}
