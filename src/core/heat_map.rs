//! Ranked, window-truncated read model handed to renderers and exporters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::density::{DensityParams, DensityProfile, Window};
use crate::core::registry::Gameplan;
use crate::domain::model::TeamId;
use crate::utils::error::GameplanError;

/// Order of team rows in a heat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowOrder {
    /// Highest density score first; ties keep rank order.
    #[default]
    Density,
    /// Plain rank order.
    Rank,
}

impl FromStr for RowOrder {
    type Err = GameplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "density" => Ok(RowOrder::Density),
            "rank" => Ok(RowOrder::Rank),
            other => Err(GameplanError::InvalidConfigValueError {
                field: "order".to_string(),
                value: other.to_string(),
                reason: "expected 'density' or 'rank'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatMapRow {
    #[serde(skip)]
    pub team: TeamId,
    pub abbr: String,
    pub name: String,
    pub code: String,
    pub rank: i32,
    pub presence: Vec<bool>,
    pub density: Vec<f64>,
    pub score: f64,
}

/// What sits in one match-number column, if a match carries that number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotInfo {
    pub number: usize,
    pub venue_sym: Option<String>,
    pub weekday: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatMap {
    pub window: Window,
    pub params: DensityParams,
    pub rows: Vec<HeatMapRow>,
    pub slots: Vec<SlotInfo>,
}

impl HeatMap {
    pub fn build(
        gameplan: &Gameplan,
        window: Window,
        params: DensityParams,
        order: RowOrder,
    ) -> Self {
        let mut rows: Vec<HeatMapRow> = gameplan
            .teams_by_rank()
            .into_iter()
            .map(|(id, team)| {
                let profile = DensityProfile::compute(gameplan.match_numbers(id), window, params);
                HeatMapRow {
                    team: id,
                    abbr: team.abbr().to_string(),
                    name: team.name().to_string(),
                    code: team.code().to_string(),
                    rank: team.rank(),
                    presence: profile.presence,
                    density: profile.density,
                    score: profile.score,
                }
            })
            .collect();

        // sort_by is stable: equal scores stay in rank-then-insertion order
        if order == RowOrder::Density {
            rows.sort_by(|a, b| b.score.total_cmp(&a.score));
        }

        let slots = window
            .match_numbers()
            .map(|number| {
                let found = u32::try_from(number)
                    .ok()
                    .and_then(|n| gameplan.match_by_id(n));
                SlotInfo {
                    number,
                    venue_sym: found.map(|m| gameplan.venue_by_id(m.venue()).sym().to_string()),
                    weekday: found.map(|m| m.weekday().to_string()),
                }
            })
            .collect();

        tracing::debug!(
            "Built heat map for {} teams over matches {}..={}",
            rows.len(),
            window.start(),
            window.max_matches()
        );

        Self {
            window,
            params,
            rows,
            slots,
        }
    }

    pub fn row(&self, abbr: &str) -> Option<&HeatMapRow> {
        self.rows.iter().find(|row| row.abbr == abbr)
    }
}
