// Domain errors raised by the efficiency calculations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A season whose possession-ending events do not outnumber its live
    /// offensive rebounds has no defined points-per-possession.
    #[error("season has {possessions} possessions ({points} points scored); points per possession is undefined")]
    NonPositivePossessions { points: u64, possessions: i64 },
}
