use crate::adapters::tsv::{self, RowSet};
use crate::core::heat_map::HeatMap;
use crate::core::registry::{Gameplan, LoadReport};
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{FixtureRow, TeamRow, VenueRow};
use crate::utils::error::Result;

/// The three input files, parsed but not yet wired together.
#[derive(Debug)]
pub struct RawSchedule {
    pub teams: Vec<TeamRow>,
    pub venues: Vec<VenueRow>,
    pub fixtures: RowSet<FixtureRow>,
}

/// A fully loaded registry and everything that was skipped on the way.
#[derive(Debug)]
pub struct LoadedSchedule {
    pub gameplan: Gameplan,
    pub report: LoadReport,
}

pub struct SchedulePipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> SchedulePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn extract(&self) -> Result<RawSchedule> {
        let teams_file = self.config.teams_file();
        let venues_file = self.config.venues_file();
        let fixtures_file = self.config.fixtures_file();

        let teams = tsv::parse_teams(&self.storage.read_file(teams_file)?, teams_file)?;
        let venues = tsv::parse_venues(&self.storage.read_file(venues_file)?, venues_file)?;
        let fixtures = tsv::parse_fixtures(&self.storage.read_file(fixtures_file)?, fixtures_file)?;

        Ok(RawSchedule {
            teams,
            venues,
            fixtures,
        })
    }

    /// Builds the registry. Teams and venues go first so fixtures can resolve
    /// against them.
    pub fn transform(&self, raw: RawSchedule) -> Result<LoadedSchedule> {
        let mut gameplan = Gameplan::new();
        gameplan.load_teams(raw.teams)?;
        gameplan.load_venues(raw.venues)?;

        // 解析階段被拒絕的行先放進報告
        let mut report = LoadReport {
            loaded: 0,
            skipped: raw.fixtures.rejected,
        };
        report.merge(gameplan.load_matches(raw.fixtures.rows)?);

        Ok(LoadedSchedule { gameplan, report })
    }

    pub fn heat_map(&self, gameplan: &Gameplan) -> Result<HeatMap> {
        let window = self.config.window_for(gameplan)?;
        Ok(HeatMap::build(
            gameplan,
            window,
            self.config.density_params(),
            self.config.row_order(),
        ))
    }
}
