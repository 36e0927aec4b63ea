use crate::config::toml_config::TomlConfig;
use crate::config::{
    validate_settings, ResolvedPaths, DEFAULT_FIXTURES_FILE, DEFAULT_OUTPUT_PATH,
    DEFAULT_TEAMS_FILE, DEFAULT_VENUES_FILE,
};
use crate::core::density::DensityParams;
use crate::core::heat_map::RowOrder;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "gameplan")]
#[command(about = "Tournament schedule heat maps from TSV fixtures")]
pub struct CliConfig {
    /// TOML configuration file; flags given here override it
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding teams.tsv, venues.tsv and fixtures.tsv
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, global = true)]
    pub teams: Option<String>,

    #[arg(long, global = true)]
    pub venues: Option<String>,

    #[arg(long, global = true)]
    pub fixtures: Option<String>,

    /// Directory for JSON exports
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// First match number shown (1-based)
    #[arg(long, global = true)]
    pub start: Option<usize>,

    /// Last match number shown; defaults to the highest match id
    #[arg(long, global = true)]
    pub max_matches: Option<usize>,

    #[arg(long, global = true)]
    pub max_offset: Option<usize>,

    #[arg(long, global = true)]
    pub decay: Option<f64>,

    /// Row order: density or rank
    #[arg(long, global = true)]
    pub order: Option<RowOrder>,

    /// Matches on or before this date (YYYY-MM-DD) render as completed
    #[arg(long, global = true)]
    pub as_of: Option<NaiveDate>,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(skip)]
    paths: ResolvedPaths,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the per-team heat map (default)
    Heatmap,
    /// List matches sorted by match number
    List {
        /// Only this team's matches
        #[arg(long)]
        team: Option<String>,
    },
    /// Write teams.json, venues.json and matches.json
    Export {
        /// Also write heatmap.json
        #[arg(long)]
        heatmap: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

impl CliConfig {
    /// Fills the input paths from `--data-dir` and the per-file flags.
    pub fn resolved(mut self) -> Self {
        self.paths = ResolvedPaths::new(
            self.data_dir.as_deref(),
            self.teams.as_deref().unwrap_or(DEFAULT_TEAMS_FILE),
            self.venues.as_deref().unwrap_or(DEFAULT_VENUES_FILE),
            self.fixtures.as_deref().unwrap_or(DEFAULT_FIXTURES_FILE),
        );
        self
    }

    /// 把命令列參數覆蓋到 TOML 配置
    pub fn apply_to(&self, config: &mut TomlConfig) {
        if let Some(data_dir) = &self.data_dir {
            config.input.data_dir = Some(data_dir.clone());
        }
        if let Some(teams) = &self.teams {
            config.input.teams = teams.clone();
        }
        if let Some(venues) = &self.venues {
            config.input.venues = venues.clone();
        }
        if let Some(fixtures) = &self.fixtures {
            config.input.fixtures = fixtures.clone();
        }
        config.resolve_paths();

        if let Some(output_path) = &self.output_path {
            config.output.path = output_path.clone();
        }
        if let Some(start) = self.start {
            config.window.start = start;
        }
        if self.max_matches.is_some() {
            config.window.max_matches = self.max_matches;
        }
        if let Some(max_offset) = self.max_offset {
            config.density.max_offset = max_offset;
        }
        if let Some(decay) = self.decay {
            config.density.decay = decay;
        }
        if let Some(order) = self.order {
            config.render.order = order;
        }
        if self.as_of.is_some() {
            config.render.as_of = self.as_of;
        }
        if self.no_color {
            config.render.color = false;
        }
    }
}

impl ConfigProvider for CliConfig {
    fn teams_file(&self) -> &str {
        &self.paths.teams
    }

    fn venues_file(&self) -> &str {
        &self.paths.venues
    }

    fn fixtures_file(&self) -> &str {
        &self.paths.fixtures
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn start(&self) -> usize {
        self.start.unwrap_or(1)
    }

    fn max_matches(&self) -> Option<usize> {
        self.max_matches
    }

    fn density_params(&self) -> DensityParams {
        let defaults = DensityParams::default();
        DensityParams {
            max_offset: self.max_offset.unwrap_or(defaults.max_offset),
            decay: self.decay.unwrap_or(defaults.decay),
        }
    }

    fn row_order(&self) -> RowOrder {
        self.order.unwrap_or_default()
    }

    fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    fn color(&self) -> bool {
        !self.no_color
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
