use crate::config::{
    validate_settings, ResolvedPaths, DEFAULT_FIXTURES_FILE, DEFAULT_OUTPUT_PATH,
    DEFAULT_TEAMS_FILE, DEFAULT_VENUES_FILE,
};
use crate::core::density::DensityParams;
use crate::core::heat_map::RowOrder;
use crate::core::ConfigProvider;
use crate::utils::error::{GameplanError, Result};
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub window: WindowConfig,
    pub density: DensityParams,
    pub render: RenderConfig,
    #[serde(skip)]
    paths: ResolvedPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub data_dir: Option<String>,
    pub teams: String,
    pub venues: String,
    pub fixtures: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            teams: DEFAULT_TEAMS_FILE.to_string(),
            venues: DEFAULT_VENUES_FILE.to_string(),
            fixtures: DEFAULT_FIXTURES_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub start: usize,
    pub max_matches: Option<usize>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            start: 1,
            max_matches: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub order: RowOrder,
    /// Matches on or before this date render as completed. Quote it in TOML: `"2025-04-01"`.
    pub as_of: Option<NaiveDate>,
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            order: RowOrder::Density,
            as_of: None,
            color: true,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GameplanError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig = toml::from_str(&processed_content)
            .map_err(|e| GameplanError::config(format!("TOML parsing error: {}", e)))?;
        config.resolve_paths();
        Ok(config)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| GameplanError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Recomputes input paths after `input` changed.
    pub fn resolve_paths(&mut self) {
        self.paths = ResolvedPaths::new(
            self.input.data_dir.as_deref(),
            &self.input.teams,
            &self.input.venues,
            &self.input.fixtures,
        );
    }
}

impl ConfigProvider for TomlConfig {
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
        &self.output.path
    }

    fn start(&self) -> usize {
        self.window.start
    }

    fn max_matches(&self) -> Option<usize> {
        self.window.max_matches
    }

    fn density_params(&self) -> DensityParams {
        self.density
    }

    fn row_order(&self) -> RowOrder {
        self.render.order
    }

    fn as_of(&self) -> Option<NaiveDate> {
        self.render.as_of
    }

    fn color(&self) -> bool {
        self.render.color
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
data_dir = "data"
fixtures = "ipl2025.tsv"

[output]
path = "./json"

[window]
start = 10
max_matches = 40

[density]
max_offset = 3
decay = 0.25

[render]
order = "rank"
as_of = "2025-04-01"
color = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.fixtures_file(),
            Path::new("data").join("ipl2025.tsv").to_string_lossy()
        );
        assert_eq!(
            config.teams_file(),
            Path::new("data").join("teams.tsv").to_string_lossy()
        );
        assert_eq!(config.output_path(), "./json");
        assert_eq!(config.start(), 10);
        assert_eq!(config.max_matches(), Some(40));
        assert_eq!(
            config.density_params(),
            DensityParams {
                max_offset: 3,
                decay: 0.25
            }
        );
        assert_eq!(config.row_order(), RowOrder::Rank);
        assert_eq!(config.as_of(), NaiveDate::from_ymd_opt(2025, 4, 1));
        assert!(!config.color());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.teams_file(), "teams.tsv");
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.start(), 1);
        assert_eq!(config.max_matches(), None);
        assert_eq!(config.density_params(), DensityParams::default());
        assert_eq!(config.row_order(), RowOrder::Density);
        assert!(config.color());
    }

    #[test]
    fn test_partial_density_table() {
        let config = TomlConfig::from_toml_str("[density]\ndecay = 0.75\n").unwrap();
        assert_eq!(config.density_params().max_offset, 2);
        assert_eq!(config.density_params().decay, 0.75);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GAMEPLAN_TEST_DATA_DIR", "season");

        let toml_content = r#"
[input]
data_dir = "${GAMEPLAN_TEST_DATA_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.data_dir.as_deref(), Some("season"));

        std::env::remove_var("GAMEPLAN_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[window]\nstart = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[density]\ndecay = 2.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[density]\ndecay = nan\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[window\nstart = 1");
        assert!(matches!(result, Err(GameplanError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"exports\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "exports");
    }
}
