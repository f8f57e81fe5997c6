// Season-by-season driver: load each season's log, analyze it, export the
// metric tables.

use crate::config::Config;
use crate::pbp;
use crate::report;
use anyhow::Context;
use shotvalue_core::{analyze, SeasonReport};
use std::path::{Path, PathBuf};
use tracing::info;

/// What a run produced.
#[derive(Debug)]
pub struct RunOutput {
    /// Most recent season first.
    pub reports: Vec<SeasonReport>,
    pub files: Vec<PathBuf>,
}

/// Analyze every configured season. Relative paths resolve against
/// `base_dir`.
pub fn analyze_seasons(config: &Config, base_dir: &Path) -> anyhow::Result<Vec<SeasonReport>> {
    let mut reports = Vec::with_capacity(config.seasons.len());

    for source in &config.seasons {
        let season = source.season();
        let path = base_dir.join(&source.path);

        info!("Loading {season} play-by-play from {}", path.display());
        let events = pbp::load_season(&path)
            .with_context(|| format!("failed to load play-by-play for {season}"))?;
        info!("Loaded {} events for {season}", events.len());

        let report = analyze(season, &events, &config.team)
            .with_context(|| format!("failed to analyze {season}"))?;
        info!(
            "{season}: {} points over {} possessions, {:.4} PPP",
            report.possessions.points,
            report.possessions.possessions,
            report.possessions.points_per_possession
        );
        reports.push(report);
    }

    Ok(reports)
}

/// Analyze every season and write the reports to the configured output
/// directory.
pub fn run(config: &Config, base_dir: &Path) -> anyhow::Result<RunOutput> {
    let reports = analyze_seasons(config, base_dir)?;

    let out_dir = base_dir.join(&config.output.dir);
    let files = report::write_reports(
        &out_dir,
        &reports,
        config.team.label(),
        config.output.summary_json,
    )
    .context("failed to write reports")?;
    info!("Wrote {} report files to {}", files.len(), out_dir.display());

    Ok(RunOutput { reports, files })
}
