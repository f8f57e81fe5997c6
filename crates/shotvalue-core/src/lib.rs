// Basketball shot-efficiency core: possession counting, shot binning,
// offensive rebound attribution, and expected points per shot category.

pub mod category;
pub mod error;
pub mod event;
pub mod expected;
pub mod filter;
pub mod possession;
pub mod rebounds;
pub mod season;
pub mod shots;

pub use category::{CategoryMap, ShotCategory, ShotValue};
pub use error::StatsError;
pub use event::{FinalScore, FreeThrowSequence, Outcome, PlayEvent, ReboundType};
pub use filter::{filter_events, FilteredEvent, FilteredLog, TeamFilter};
pub use season::{analyze, Season, SeasonReport};
