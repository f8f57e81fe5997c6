// Expected points per shot category.

use crate::category::CategoryMap;
use crate::shots::{ratio, ShotTally};

/// Expected points per attempt: point value times make rate.
///
/// Categories without attempts have no defined value and yield `None`.
pub fn expected_points(shots: &CategoryMap<ShotTally>) -> CategoryMap<Option<f64>> {
    shots.map(|category, tally| {
        tally
            .make_rate()
            .map(|rate| f64::from(category.points()) * rate)
    })
}

/// Expected points per attempt, adding the value of recovered offensive
/// rebounds. Each recovery is worth the season's points per possession.
pub fn expected_points_with_rebounds(
    shots: &CategoryMap<ShotTally>,
    rebounds: &CategoryMap<u32>,
    points_per_possession: f64,
) -> CategoryMap<Option<f64>> {
    shots.map(|category, tally| {
        let make_rate = tally.make_rate()?;
        let rebound_rate = rebound_rate(tally, rebounds[category])?;
        Some(f64::from(category.points()) * make_rate + rebound_rate * points_per_possession)
    })
}

/// Offensive rebounds recovered per attempt.
pub fn rebound_rate(tally: &ShotTally, offensive_rebounds: u32) -> Option<f64> {
    ratio(offensive_rebounds, tally.attempts)
}

/// Offensive rebounds recovered per miss.
pub fn rebound_rate_of_misses(tally: &ShotTally, offensive_rebounds: u32) -> Option<f64> {
    ratio(offensive_rebounds, tally.misses())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ShotCategory;

    const EPS: f64 = 1e-12;

    fn shots_with(entries: &[(ShotCategory, u32, u32)]) -> CategoryMap<ShotTally> {
        let mut shots: CategoryMap<ShotTally> = CategoryMap::default();
        for &(category, attempts, makes) in entries {
            shots[category] = ShotTally { attempts, makes };
        }
        shots
    }

    // -- Without rebound value --

    #[test]
    fn single_made_layup() {
        let shots = shots_with(&[(ShotCategory::TwoAtRim, 1, 1)]);
        let exp = expected_points(&shots);
        assert!((exp[ShotCategory::TwoAtRim].unwrap() - 2.0).abs() < EPS);
        for (category, value) in exp.iter() {
            if category != ShotCategory::TwoAtRim {
                assert_eq!(*value, None, "{category}");
            }
        }
    }

    #[test]
    fn threes_are_worth_three() {
        let shots = shots_with(&[(ShotCategory::ThreeStandard, 10, 4)]);
        let exp = expected_points(&shots);
        assert!((exp[ShotCategory::ThreeStandard].unwrap() - 1.2).abs() < EPS);
    }

    // -- With rebound value --

    #[test]
    fn rebound_value_adds_rate_times_ppp() {
        let shots = shots_with(&[(ShotCategory::TwoAtRim, 10, 6)]);
        let mut rebounds: CategoryMap<u32> = CategoryMap::default();
        rebounds[ShotCategory::TwoAtRim] = 2;

        let exp = expected_points_with_rebounds(&shots, &rebounds, 1.1);
        // 2 * 0.6 + 0.2 * 1.1
        assert!((exp[ShotCategory::TwoAtRim].unwrap() - 1.42).abs() < EPS);
    }

    #[test]
    fn rebound_value_never_lowers_expected_points() {
        let shots = shots_with(&[
            (ShotCategory::TwoAtRim, 50, 30),
            (ShotCategory::TwoLong, 40, 16),
            (ShotCategory::ThreeDeep, 20, 7),
        ]);
        let rebounds = CategoryMap::from_fn(|c| if c.points() == 2 { 5 } else { 1 });
        let plain = expected_points(&shots);
        let with_orb = expected_points_with_rebounds(&shots, &rebounds, 1.08);
        for (category, value) in with_orb.iter() {
            if let (Some(with), Some(without)) = (value, plain[category]) {
                assert!(*with > without, "{category}");
            }
        }
    }

    #[test]
    fn zero_attempt_category_is_undefined() {
        let shots: CategoryMap<ShotTally> = CategoryMap::default();
        let rebounds: CategoryMap<u32> = CategoryMap::default();
        let exp = expected_points_with_rebounds(&shots, &rebounds, 1.0);
        assert!(exp.values().all(Option::is_none));
    }

    // -- Rebound rates --

    #[test]
    fn rebound_rates() {
        let tally = ShotTally { attempts: 10, makes: 6 };
        assert_eq!(rebound_rate(&tally, 2), Some(0.2));
        assert_eq!(rebound_rate_of_misses(&tally, 2), Some(0.5));

        let all_makes = ShotTally { attempts: 3, makes: 3 };
        assert_eq!(rebound_rate_of_misses(&all_makes, 0), None);
    }
}
