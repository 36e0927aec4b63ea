#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use std::path::Path;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_range};

pub const DEFAULT_TEAMS_FILE: &str = "teams.tsv";
pub const DEFAULT_VENUES_FILE: &str = "venues.tsv";
pub const DEFAULT_FIXTURES_FILE: &str = "fixtures.tsv";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Input file paths with the data directory already applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub teams: String,
    pub venues: String,
    pub fixtures: String,
}

impl ResolvedPaths {
    pub fn new(data_dir: Option<&str>, teams: &str, venues: &str, fixtures: &str) -> Self {
        let join = |file: &str| match data_dir {
            Some(dir) => Path::new(dir).join(file).to_string_lossy().into_owned(),
            None => file.to_string(),
        };
        Self {
            teams: join(teams),
            venues: join(venues),
            fixtures: join(fixtures),
        }
    }
}

/// Checks that apply to every configuration source.
pub fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("input.teams", config.teams_file())?;
    validate_path("input.venues", config.venues_file())?;
    validate_path("input.fixtures", config.fixtures_file())?;
    validate_path("output.path", config.output_path())?;
    validate_positive_number("window.start", config.start(), 1)?;
    validate_range("density.decay", config.density_params().decay, 0.0, 1.0)?;
    Ok(())
}
