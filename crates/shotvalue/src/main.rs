// Shot value analysis entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr)
// 2. Load config (seeding config/ from defaults/ on first run)
// 3. Analyze each season, most recent first
// 4. Write metric tables

use shotvalue::config;
use shotvalue::run;

use anyhow::Context;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Shot value analysis starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: team={}, {} seasons, output={}",
        config.team.label(),
        config.seasons.len(),
        config.output.dir
    );

    // 3-4. Analyze and export
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let output = run::run(&config, &cwd)?;

    for report in &output.reports {
        info!(
            "{}: {:.4} points per possession, {} field goal attempts",
            report.label,
            report.possessions.points_per_possession,
            report.total_attempts()
        );
    }

    info!("Shot value analysis finished");
    Ok(())
}

/// Initialize tracing to stderr; stdout stays free for piping.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shotvalue=info,shotvalue_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
