// Offensive rebound attribution to missed shots.
//
// A miss is credited with a recovery when the very next row of the ordered
// log is a live offensive rebound from the same game.

use crate::category::CategoryMap;
use crate::event::Outcome;
use crate::filter::{FilteredEvent, FilteredLog};
use tracing::debug;

/// Count offensive rebounds recovered off missed shots, per category.
///
/// A miss on the last row of the log has no following row and is credited
/// nothing. The count for each category never exceeds that category's
/// misses.
pub fn tally_rebounds(log: &FilteredLog) -> CategoryMap<u32> {
    let mut recoveries: CategoryMap<u32> = CategoryMap::default();
    let events = log.events();
    let mut crossed_games = 0usize;

    for (i, event) in events.iter().enumerate() {
        let Some(attempt) = event.shot_attempt() else {
            continue;
        };
        if attempt.outcome != Outcome::Miss {
            continue;
        }
        let Some(next) = events.get(i + 1) else {
            continue;
        };
        if !next.is_live_offensive_rebound() {
            continue;
        }
        if !same_game(event, next) {
            crossed_games += 1;
            continue;
        }
        recoveries[attempt.category] += 1;
    }

    if crossed_games > 0 {
        debug!(crossed_games, "ignored rebounds that follow a miss from another game");
    }
    recoveries
}

/// Rows without a game identity are assumed to share one.
fn same_game(shot: &FilteredEvent, rebound: &FilteredEvent) -> bool {
    match (&shot.game_id, &rebound.game_id) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ShotCategory;
    use crate::event::testing::*;
    use crate::event::{PlayEvent, ReboundType};
    use crate::filter::{filter_events, TeamFilter};
    use crate::shots::tally_shots;

    fn rebounds(events: &[PlayEvent]) -> CategoryMap<u32> {
        tally_rebounds(&filter_events(events, &TeamFilter::All))
    }

    // -- Attribution --

    #[test]
    fn deep_three_miss_followed_by_offensive_rebound() {
        let events = vec![
            shot("3-pt jump shot", Outcome::Miss, 28.0),
            rebound(ReboundType::Offensive, 45),
        ];
        let recoveries = rebounds(&events);
        assert_eq!(recoveries[ShotCategory::ThreeDeep], 1);
        let total: u32 = recoveries.values().sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn defensive_and_end_of_period_rebounds_are_not_credited() {
        let events = vec![
            shot("2-pt layup", Outcome::Miss, 2.0),
            rebound(ReboundType::Defensive, 45),
            shot("2-pt layup", Outcome::Miss, 2.0),
            rebound(ReboundType::Offensive, 0),
        ];
        assert!(rebounds(&events).values().all(|n| *n == 0));
    }

    #[test]
    fn made_shots_are_never_credited() {
        let events = vec![
            shot("2-pt layup", Outcome::Make, 2.0),
            rebound(ReboundType::Offensive, 45),
        ];
        assert!(rebounds(&events).values().all(|n| *n == 0));
    }

    #[test]
    fn only_the_immediately_following_row_counts() {
        // Turnover rows are filtered out, so the rebound ends up adjacent;
        // a shot in between breaks adjacency.
        let events = vec![
            shot("2-pt jump shot", Outcome::Miss, 12.0),
            shot("2-pt layup", Outcome::Make, 1.0),
            rebound(ReboundType::Offensive, 45),
        ];
        assert!(rebounds(&events).values().all(|n| *n == 0));
    }

    // -- Boundaries --

    #[test]
    fn miss_on_last_row_credits_nothing() {
        let events = vec![shot("3-pt jump shot", Outcome::Miss, 24.0)];
        assert!(rebounds(&events).values().all(|n| *n == 0));
    }

    #[test]
    fn rebound_from_next_game_is_not_credited() {
        let events = vec![
            in_game(shot("3-pt jump shot", Outcome::Miss, 24.0), "game-1"),
            in_game(rebound(ReboundType::Offensive, 700), "game-2"),
            in_game(shot("3-pt jump shot", Outcome::Miss, 24.0), "game-2"),
            in_game(rebound(ReboundType::Offensive, 690), "game-2"),
        ];
        let recoveries = rebounds(&events);
        assert_eq!(recoveries[ShotCategory::ThreeStandard], 1);
    }

    #[test]
    fn recoveries_never_exceed_misses() {
        let events = vec![
            shot("2-pt layup", Outcome::Miss, 1.0),
            rebound(ReboundType::Offensive, 45),
            shot("2-pt layup", Outcome::Miss, 1.0),
            rebound(ReboundType::Offensive, 44),
            shot("2-pt layup", Outcome::Make, 1.0),
            shot("2-pt layup", Outcome::Miss, 1.0),
        ];
        let log = filter_events(&events, &TeamFilter::All);
        let shots = tally_shots(&log);
        let recoveries = tally_rebounds(&log);
        for (category, n) in recoveries.iter() {
            assert!(*n <= shots[category].misses(), "{category}");
        }
        assert_eq!(recoveries[ShotCategory::TwoAtRim], 2);
    }
}
