//! JSON export of the schedule and the ranked heat map.

use serde::Serialize;

use crate::core::heat_map::HeatMap;
use crate::core::registry::Gameplan;
use crate::domain::ports::{Renderer, Storage};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRecord {
    pub name: String,
    pub abbr: String,
    pub code: String,
    /// Position in the teams file, starting at 1.
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueRecord {
    pub name: String,
    pub sym: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: u32,
    pub day: String,
    pub date: String,
    pub team_a: String,
    pub team_b: String,
    pub venue: String,
    pub time: String,
}

pub fn team_records(gameplan: &Gameplan) -> Vec<TeamRecord> {
    gameplan
        .teams()
        .iter()
        .enumerate()
        .map(|(index, team)| TeamRecord {
            name: team.name().to_string(),
            abbr: team.abbr().to_string(),
            code: team.code().to_string(),
            rank: index + 1,
        })
        .collect()
}

pub fn venue_records(gameplan: &Gameplan) -> Vec<VenueRecord> {
    gameplan
        .venues()
        .iter()
        .map(|venue| VenueRecord {
            name: venue.name().to_string(),
            sym: venue.sym().to_string(),
        })
        .collect()
}

/// Matches sorted by id, teams by abbreviation and venue by name.
pub fn match_records(gameplan: &Gameplan) -> Vec<MatchRecord> {
    gameplan
        .all_matches_by_id()
        .into_iter()
        .map(|m| MatchRecord {
            id: m.id(),
            day: m.weekday().to_string(),
            date: m.date().to_string(),
            team_a: gameplan.team_by_id(m.team_a()).abbr().to_string(),
            team_b: gameplan.team_by_id(m.team_b()).abbr().to_string(),
            venue: gameplan.venue_by_id(m.venue()).name().to_string(),
            time: m.time().to_string(),
        })
        .collect()
}

/// Renders the heat map read model as pretty JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, _gameplan: &Gameplan, heat_map: &HeatMap) -> Result<String> {
        Ok(serde_json::to_string_pretty(heat_map)?)
    }
}

pub struct JsonExporter<'a, S: Storage> {
    storage: &'a S,
    output_path: String,
}

impl<'a, S: Storage> JsonExporter<'a, S> {
    pub fn new(storage: &'a S, output_path: impl Into<String>) -> Self {
        Self {
            storage,
            output_path: output_path.into(),
        }
    }

    /// Writes `teams.json`, `venues.json`, `matches.json` and, when given,
    /// `heatmap.json`. Returns the written paths.
    pub fn export(&self, gameplan: &Gameplan, heat_map: Option<&HeatMap>) -> Result<Vec<String>> {
        let mut written = vec![
            self.write_json("teams.json", &team_records(gameplan))?,
            self.write_json("venues.json", &venue_records(gameplan))?,
            self.write_json("matches.json", &match_records(gameplan))?,
        ];

        if let Some(heat_map) = heat_map {
            let rendered = JsonRenderer.render(gameplan, heat_map)?;
            written.push(self.write_bytes("heatmap.json", rendered.as_bytes())?);
        }

        tracing::info!("📁 Exported {} JSON files to {}", written.len(), self.output_path);
        Ok(written)
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_bytes(name, json.as_bytes())
    }

    fn write_bytes(&self, name: &str, data: &[u8]) -> Result<String> {
        let path = format!("{}/{}", self.output_path.trim_end_matches('/'), name);
        self.storage.write_file(&path, data)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::density::{DensityParams, Window};
    use crate::core::heat_map::RowOrder;
    use crate::domain::model::{FixtureRow, TeamRow, VenueRow};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()).into()
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn gameplan() -> Gameplan {
        let mut gameplan = Gameplan::new();
        gameplan
            .load_teams(vec![
                TeamRow {
                    name: "Alpha".to_string(),
                    abbr: "A".to_string(),
                    code: "1".to_string(),
                    rank: Some(5),
                },
                TeamRow {
                    name: "Beta".to_string(),
                    abbr: "B".to_string(),
                    code: "2".to_string(),
                    rank: None,
                },
            ])
            .unwrap();
        gameplan
            .load_venues(vec![VenueRow {
                name: "Stadium1".to_string(),
                sym: "S1".to_string(),
            }])
            .unwrap();
        let fixture = |id: u32, a: &str, b: &str| FixtureRow {
            match_day: 1,
            match_id: id,
            weekday: "Mon".to_string(),
            date: "0103".to_string(),
            time: "19:00".to_string(),
            team_a: a.to_string(),
            team_b: b.to_string(),
            venue: "Stadium1".to_string(),
            line: 0,
        };
        gameplan
            .load_matches(vec![fixture(2, "B", "A"), fixture(1, "A", "B")])
            .unwrap();
        gameplan
    }

    #[test]
    fn test_records_follow_export_layout() {
        let gp = gameplan();

        let teams = team_records(&gp);
        assert_eq!(teams[0].rank, 1);
        assert_eq!(teams[1].rank, 2);

        let matches = match_records(&gp);
        assert_eq!(matches[0].id, 1);
        assert_eq!(matches[1].team_a, "B");

        let json = serde_json::to_value(&matches[0]).unwrap();
        assert_eq!(json["teamA"], "A");
        assert_eq!(json["teamB"], "B");
        assert_eq!(json["venue"], "Stadium1");
        assert_eq!(json["day"], "Mon");
    }

    #[test]
    fn test_export_writes_all_files() {
        let gp = gameplan();
        let storage = MockStorage::default();
        let heat_map = HeatMap::build(
            &gp,
            Window::new(1, 2).unwrap(),
            DensityParams::default(),
            RowOrder::Density,
        );

        let written = JsonExporter::new(&storage, "out/")
            .export(&gp, Some(&heat_map))
            .unwrap();

        assert_eq!(
            written,
            vec![
                "out/teams.json",
                "out/venues.json",
                "out/matches.json",
                "out/heatmap.json"
            ]
        );

        let venues: serde_json::Value =
            serde_json::from_slice(&storage.get_file("out/venues.json").unwrap()).unwrap();
        assert_eq!(venues[0]["sym"], "S1");

        let heat: serde_json::Value =
            serde_json::from_slice(&storage.get_file("out/heatmap.json").unwrap()).unwrap();
        assert_eq!(heat["rows"].as_array().unwrap().len(), 2);
        assert_eq!(heat["window"]["start"], 1);
        assert_eq!(heat["rows"][0]["presence"][0], true);
    }

    #[test]
    fn test_export_without_heat_map() {
        let gp = gameplan();
        let storage = MockStorage::default();

        let written = JsonExporter::new(&storage, "out").export(&gp, None).unwrap();

        assert_eq!(written.len(), 3);
        assert!(storage.get_file("out/heatmap.json").is_none());
    }
}
