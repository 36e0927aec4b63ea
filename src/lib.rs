pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::{json_export::JsonRenderer, storage::LocalStorage, terminal::TerminalRenderer};
pub use crate::core::{
    density::{DensityParams, Window},
    engine::GameplanEngine,
    heat_map::{HeatMap, RowOrder},
    pipeline::{LoadedSchedule, SchedulePipeline},
    registry::{Gameplan, LoadReport},
};
pub use domain::ports::{ConfigProvider, Renderer, Storage};
pub use utils::error::{GameplanError, Result};
