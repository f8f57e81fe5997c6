// Configuration loading and parsing (config/analysis.toml).

use serde::Deserialize;
use shotvalue_core::{Season, TeamFilter};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the single configuration file, under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "analysis.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub team: TeamFilter,
    pub output: OutputConfig,
    /// Season inputs, most recent season first.
    pub seasons: Vec<SeasonSource>,
}

// ---------------------------------------------------------------------------
// analysis.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct AnalysisFile {
    #[serde(default)]
    analysis: AnalysisSection,
    output: OutputConfig,
    #[serde(default)]
    seasons: Vec<SeasonSource>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalysisSection {
    #[serde(default = "default_team")]
    team: String,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        AnalysisSection {
            team: default_team(),
        }
    }
}

fn default_team() -> String {
    "ALL".into()
}

fn default_summary_json() -> bool {
    true
}

/// Where and how metric tables are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
    #[serde(default = "default_summary_json")]
    pub summary_json: bool,
}

/// One season's play-by-play file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonSource {
    pub start_year: u16,
    pub path: String,
}

impl SeasonSource {
    pub fn season(&self) -> Season {
        Season::new(self.start_year)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load `config/analysis.toml` relative to `base_dir`, without seeding
/// defaults.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = std::fs::read_to_string(&path)
        .map_err(|_| ConfigError::FileNotFound { path: path.clone() })?;
    parse_config(&text, &path)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: AnalysisFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate(&file)?;

    let mut seasons = file.seasons;
    seasons.sort_by(|a, b| b.start_year.cmp(&a.start_year));

    Ok(Config {
        team: TeamFilter::parse(&file.analysis.team),
        output: file.output,
        seasons,
    })
}

/// Copy `defaults/analysis.toml` into `config/` when it is not there yet.
/// Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the project root",
                target.display(),
                source.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create {}: {e}", config_dir.display()),
    })?;
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", source.display()),
    })?;

    Ok(Some(target))
}

/// Loads config relative to the current working directory, seeding it from
/// defaults on first run.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: &AnalysisFile) -> Result<(), ConfigError> {
    if file.analysis.team.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "analysis.team".into(),
            message: "must be \"ALL\" or a team token".into(),
        });
    }

    if file.output.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "output.dir".into(),
            message: "must not be empty".into(),
        });
    }

    if file.seasons.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "seasons".into(),
            message: "at least one season is required".into(),
        });
    }

    let mut seen = HashSet::new();
    for (i, source) in file.seasons.iter().enumerate() {
        if source.path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("seasons[{i}].path"),
                message: "must not be empty".into(),
            });
        }
        if !seen.insert(source.start_year) {
            return Err(ConfigError::ValidationError {
                field: format!("seasons[{i}].start_year"),
                message: format!("duplicate season {}", source.season()),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"
[analysis]
team = "ALL"

[output]
dir = "output"

[[seasons]]
start_year = 2017
path = "data/NBA-PBP-2017-2018.csv"

[[seasons]]
start_year = 2019
path = "data/NBA-PBP-2019-2020.csv"

[[seasons]]
start_year = 2018
path = "data/NBA-PBP-2018-2019.csv"
"#;

    fn parse(text: &str) -> Result<Config, ConfigError> {
        parse_config(text, Path::new("analysis.toml"))
    }

    fn expect_validation_field(text: &str, expected: &str) {
        match parse(text) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected validation error on {expected}, got {other:?}"),
        }
    }

    #[test]
    fn parses_and_orders_seasons_most_recent_first() {
        let config = parse(VALID).expect("valid config");
        assert_eq!(config.team, TeamFilter::All);
        assert_eq!(config.output.dir, "output");
        assert!(config.output.summary_json);
        let years: Vec<u16> = config.seasons.iter().map(|s| s.start_year).collect();
        assert_eq!(years, vec![2019, 2018, 2017]);
        assert_eq!(config.seasons[0].season().label(), "2019-2020");
    }

    #[test]
    fn team_token_becomes_filter() {
        let text = VALID.replace("team = \"ALL\"", "team = \"BOS\"");
        let config = parse(&text).unwrap();
        assert_eq!(config.team, TeamFilter::Team("BOS".into()));
    }

    #[test]
    fn missing_analysis_section_defaults_to_all() {
        let text = VALID.replace("[analysis]\nteam = \"ALL\"\n", "");
        let config = parse(&text).unwrap();
        assert_eq!(config.team, TeamFilter::All);
    }

    #[test]
    fn rejects_empty_team() {
        let text = VALID.replace("team = \"ALL\"", "team = \"  \"");
        expect_validation_field(&text, "analysis.team");
    }

    #[test]
    fn rejects_empty_output_dir() {
        let text = VALID.replace("dir = \"output\"", "dir = \"\"");
        expect_validation_field(&text, "output.dir");
    }

    #[test]
    fn rejects_no_seasons() {
        let text = "[output]\ndir = \"output\"\n";
        expect_validation_field(text, "seasons");
    }

    #[test]
    fn rejects_duplicate_season() {
        let text = VALID.replace("start_year = 2018", "start_year = 2019");
        expect_validation_field(&text, "seasons[2].start_year");
    }

    #[test]
    fn rejects_empty_season_path() {
        let text = VALID.replace("path = \"data/NBA-PBP-2018-2019.csv\"", "path = \"\"");
        expect_validation_field(&text, "seasons[2].path");
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let result = parse("[output\ndir = ");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    // -- Filesystem loading --

    #[test]
    fn missing_config_file() {
        let tmp = std::env::temp_dir().join("shotvalue_config_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let result = load_config_from(&tmp);
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
        assert!(matches!(
            ensure_config_file(&tmp),
            Err(ConfigError::DefaultsCopyError { .. })
        ));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_copies_defaults_once() {
        let tmp = std::env::temp_dir().join("shotvalue_config_test_ensure");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults").join(CONFIG_FILE), VALID).unwrap();

        let copied = ensure_config_file(&tmp).unwrap();
        assert_eq!(copied, Some(tmp.join("config").join(CONFIG_FILE)));
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);

        let config = load_config_from(&tmp).expect("should load seeded config");
        assert_eq!(config.seasons.len(), 3);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn shipped_defaults_are_valid() {
        let defaults = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("defaults")
            .join(CONFIG_FILE);
        let text = fs::read_to_string(&defaults).unwrap();
        let config = parse_config(&text, &defaults).expect("defaults should validate");
        assert_eq!(config.seasons.len(), 4);
        assert_eq!(config.seasons[0].start_year, 2019);
        assert_eq!(config.seasons[3].start_year, 2016);
    }
}
