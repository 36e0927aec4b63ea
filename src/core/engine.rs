use crate::adapters::json_export::JsonExporter;
use crate::core::pipeline::{LoadedSchedule, SchedulePipeline};
use crate::core::{ConfigProvider, Renderer, Storage};
use crate::domain::model::Match;
use crate::utils::error::{GameplanError, Result};

pub struct GameplanEngine<S: Storage, C: ConfigProvider> {
    pipeline: SchedulePipeline<S, C>,
}

impl<S: Storage, C: ConfigProvider> GameplanEngine<S, C> {
    pub fn new(pipeline: SchedulePipeline<S, C>) -> Self {
        Self { pipeline }
    }

    pub fn config(&self) -> &C {
        self.pipeline.config()
    }

    pub fn load(&self) -> Result<LoadedSchedule> {
        tracing::info!("📥 Reading schedule files...");
        let raw = self.pipeline.extract()?;
        tracing::info!(
            "Read {} teams, {} venues, {} fixtures",
            raw.teams.len(),
            raw.venues.len(),
            raw.fixtures.rows.len() + raw.fixtures.rejected.len()
        );

        tracing::info!("🔗 Building schedule...");
        let loaded = self.pipeline.transform(raw)?;

        if loaded.report.is_clean() {
            tracing::info!("✅ Loaded {} matches", loaded.report.loaded);
        } else {
            tracing::warn!(
                "⚠️  Loaded {} matches, skipped {} rows",
                loaded.report.loaded,
                loaded.report.skipped.len()
            );
        }

        Ok(loaded)
    }

    pub fn render_heat_map(&self, schedule: &LoadedSchedule, renderer: &dyn Renderer) -> Result<String> {
        let heat_map = self.pipeline.heat_map(&schedule.gameplan)?;
        tracing::debug!(
            "Rendering {} rows over {} slots",
            heat_map.rows.len(),
            heat_map.slots.len()
        );
        renderer.render(&schedule.gameplan, &heat_map)
    }

    /// Writes the JSON files and returns their paths.
    pub fn export(&self, schedule: &LoadedSchedule, include_heat_map: bool) -> Result<Vec<String>> {
        let heat_map = if include_heat_map {
            Some(self.pipeline.heat_map(&schedule.gameplan)?)
        } else {
            None
        };

        JsonExporter::new(self.pipeline.storage(), self.config().output_path())
            .export(&schedule.gameplan, heat_map.as_ref())
    }

    /// Every match, or one team's matches, sorted by match number.
    pub fn list_matches<'a>(
        &self,
        schedule: &'a LoadedSchedule,
        team: Option<&str>,
    ) -> Result<Vec<&'a Match>> {
        match team {
            Some(abbr) => schedule.gameplan.matches_for_team(abbr).ok_or_else(|| {
                GameplanError::InvalidArgument {
                    name: "team".to_string(),
                    value: abbr.to_string(),
                    reason: "no team with this abbreviation".to_string(),
                }
            }),
            None => Ok(schedule.gameplan.all_matches_by_id()),
        }
    }
}
