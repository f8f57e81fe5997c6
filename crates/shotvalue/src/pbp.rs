// Play-by-play CSV loading.
//
// Reads one season of NBA play-by-play (one row per event, one column per
// event attribute) into `PlayEvent`s. Row order is preserved exactly; the
// rebound attribution downstream depends on it.

use serde::Deserialize;
use shotvalue_core::{FinalScore, FreeThrowSequence, Outcome, PlayEvent, ReboundType};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// `AwayPlay` text on the row carrying a game's final score.
const END_OF_GAME: &str = "End of Game";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PbpError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// The columns this analysis reads. Every other column is ignored; missing
/// columns and empty cells come through as `None`. Numeric cells that fail
/// to parse are treated as missing rather than rejecting the row.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlay {
    #[serde(default)]
    URL: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    SecLeft: Option<u32>,
    #[serde(default)]
    AwayPlay: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    AwayScore: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    HomeScore: Option<u32>,
    #[serde(default)]
    Shooter: Option<String>,
    #[serde(default)]
    ShotType: Option<String>,
    #[serde(default)]
    ShotOutcome: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    ShotDist: Option<f64>,
    #[serde(default)]
    Rebounder: Option<String>,
    #[serde(default)]
    ReboundType: Option<String>,
    #[serde(default)]
    FreeThrowOutcome: Option<String>,
    #[serde(default)]
    FreeThrowNum: Option<String>,
    #[serde(default)]
    TurnoverType: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim a text cell; whitespace-only cells are missing.
fn text(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn outcome(cell: Option<&str>, column: &str, row: usize) -> Option<Outcome> {
    let label = cell?;
    let parsed = Outcome::parse(label);
    if parsed.is_none() {
        warn!("row {row}: unknown {column} '{label}', treating as missing");
    }
    parsed
}

fn into_event(raw: RawPlay, row: usize) -> PlayEvent {
    let shot_outcome = text(raw.ShotOutcome);
    let free_throw_outcome = text(raw.FreeThrowOutcome);
    let free_throw_label = text(raw.FreeThrowNum);

    let free_throw = free_throw_label.as_deref().and_then(|label| {
        let parsed = FreeThrowSequence::parse(label);
        if parsed.is_none() {
            debug!("row {row}: free throw label '{label}' is not an \"N of M\" sequence");
        }
        parsed
    });

    let final_score = match text(raw.AwayPlay) {
        Some(play) if play == END_OF_GAME => match (raw.HomeScore, raw.AwayScore) {
            (Some(home), Some(away)) => Some(FinalScore { home, away }),
            _ => {
                warn!("row {row}: end-of-game row without both final scores");
                None
            }
        },
        _ => None,
    };

    PlayEvent {
        game_id: text(raw.URL),
        seconds_left: raw.SecLeft,
        shooter: text(raw.Shooter),
        shot_type: text(raw.ShotType),
        shot_outcome: outcome(shot_outcome.as_deref(), "ShotOutcome", row),
        shot_distance: raw.ShotDist,
        rebounder: text(raw.Rebounder),
        rebound_type: text(raw.ReboundType).map(|s| ReboundType::parse(&s)),
        turnover_type: text(raw.TurnoverType),
        free_throw,
        free_throw_outcome: outcome(free_throw_outcome.as_deref(), "FreeThrowOutcome", row),
        final_score,
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_events_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayEvent>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    reader.headers()?;

    let mut events = Vec::new();
    for (i, result) in reader.deserialize::<RawPlay>().enumerate() {
        // Header is line 1.
        let row = i + 2;
        match result {
            Ok(raw) => events.push(into_event(raw, row)),
            Err(e) => warn!("skipping malformed play-by-play row {row}: {e}"),
        }
    }
    Ok(events)
}

/// Load one season's play-by-play events in file order.
pub fn load_season(path: &Path) -> Result<Vec<PlayEvent>, PbpError> {
    let file = std::fs::File::open(path).map_err(|e| PbpError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let events = load_events_from_reader(std::io::BufReader::new(file)).map_err(|e| {
        PbpError::Csv {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    if events.is_empty() {
        return Err(PbpError::Validation(format!(
            "{} produced zero play-by-play rows",
            path.display()
        )));
    }
    Ok(events)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
