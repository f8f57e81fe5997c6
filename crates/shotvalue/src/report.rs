// Metric table export.
//
// One CSV per metric, shot categories down the side and seasons across the
// top (most recent first), plus an optional JSON dump of every season
// report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shotvalue_core::season::CategorySummary;
use shotvalue_core::{SeasonReport, ShotCategory};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SUMMARY_FILE: &str = "summary.json";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error writing {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// A per-category quantity plotted for each season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    ShotAttempts,
    /// Field goal percentage.
    ShotPercentages,
    /// Offensive rebounds as a percentage of attempts.
    OrbPercentageOfAttempts,
    /// Offensive rebounds as a percentage of misses.
    OrbPercentageOfMisses,
    ExpectedPoints,
    ExpectedPointsWithRebounds,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::ShotAttempts,
        Metric::ShotPercentages,
        Metric::OrbPercentageOfAttempts,
        Metric::OrbPercentageOfMisses,
        Metric::ExpectedPoints,
        Metric::ExpectedPointsWithRebounds,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Metric::ShotAttempts => "shot_attempts.csv",
            Metric::ShotPercentages => "shot_percentages.csv",
            Metric::OrbPercentageOfAttempts => "orb_percentage_of_attempts.csv",
            Metric::OrbPercentageOfMisses => "orb_percentage_of_misses.csv",
            Metric::ExpectedPoints => "exp_pts.csv",
            Metric::ExpectedPointsWithRebounds => "exp_pts_w_orb.csv",
        }
    }

    /// Cell text for one category. Undefined rates are empty.
    fn cell(self, summary: &CategorySummary) -> String {
        let percent = |rate: Option<f64>| rate.map(|r| format!("{:.2}", r * 100.0));
        let points = |value: Option<f64>| value.map(|v| format!("{v:.4}"));

        let value = match self {
            Metric::ShotAttempts => Some(summary.attempts.to_string()),
            Metric::ShotPercentages => percent(summary.make_rate),
            Metric::OrbPercentageOfAttempts => percent(summary.rebound_rate),
            Metric::OrbPercentageOfMisses => percent(summary.rebound_rate_of_misses),
            Metric::ExpectedPoints => points(summary.expected_points),
            Metric::ExpectedPointsWithRebounds => points(summary.expected_points_with_rebounds),
        };
        value.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write one metric table. `reports` should already be ordered most recent
/// season first; columns follow that order.
pub fn write_metric_table<W: Write>(
    writer: W,
    metric: Metric,
    reports: &[SeasonReport],
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["shot_type".to_string()];
    header.extend(reports.iter().map(|r| r.label.clone()));
    wtr.write_record(&header)?;

    for category in ShotCategory::ALL {
        let mut row = vec![category.label().to_string()];
        row.extend(reports.iter().map(|r| metric.cell(&r.categories[category])));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct Summary<'a> {
    generated_at: DateTime<Utc>,
    team: &'a str,
    seasons: &'a [SeasonReport],
}

/// Write every metric table (and optionally `summary.json`) into `dir`,
/// creating it if needed. Returns the files written.
pub fn write_reports(
    dir: &Path,
    reports: &[SeasonReport],
    team: &str,
    summary_json: bool,
) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();
    for metric in Metric::ALL {
        let path = dir.join(metric.file_name());
        let file = create(&path)?;
        write_metric_table(file, metric, reports).map_err(|e| ReportError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
        debug!("wrote {}", path.display());
        written.push(path);
    }

    if summary_json {
        let path = dir.join(SUMMARY_FILE);
        let mut file = create(&path)?;
        let summary = Summary {
            generated_at: Utc::now(),
            team,
            seasons: reports,
        };
        serde_json::to_writer_pretty(&mut file, &summary).map_err(|e| ReportError::Json {
            path: path.display().to_string(),
            source: e,
        })?;
        file.flush().map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn create(path: &Path) -> Result<std::io::BufWriter<std::fs::File>, ReportError> {
    std::fs::File::create(path)
        .map(std::io::BufWriter::new)
        .map_err(|e| ReportError::Io {
            path: path.display().to_string(),
            source: e,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
