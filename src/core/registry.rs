//! The schedule registry.
//!
//! [`Gameplan`] owns three arenas (teams, venues, matches). Matches refer to
//! teams and venues by [`TeamId`]/[`VenueId`]; teams and venues refer back to
//! matches by [`MatchId`]. Every back-reference is written by
//! [`Gameplan::add_match`] and nowhere else, so a team's match list holds a
//! match exactly when the team plays in it.

use std::collections::HashMap;

use crate::domain::model::{
    FixtureRow, Match, MatchId, Team, TeamId, TeamRow, Venue, VenueId, VenueRow,
};
use crate::utils::error::{EntityKind, GameplanError, Result};

/// A match whose team and venue references have already been resolved.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub id: u32,
    pub match_day: u32,
    pub weekday: String,
    pub date: String,
    pub time: String,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub venue: VenueId,
}

/// A row that was dropped during load, with the reason.
#[derive(Debug)]
pub struct SkippedRow {
    /// 1-based source line, or the position in the input when the row has
    /// no source line.
    pub row: usize,
    pub error: GameplanError,
}

/// Outcome of a fixtures load. Skipped rows are never silent.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Combines two reports and keeps skipped rows in source order.
    pub fn merge(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.skipped.extend(other.skipped);
        self.skipped.sort_by_key(|skipped| skipped.row);
    }
}

#[derive(Debug, Default)]
pub struct Gameplan {
    teams: Vec<Team>,
    venues: Vec<Venue>,
    matches: Vec<Match>,
    team_index: HashMap<String, TeamId>,
    venue_index: HashMap<String, VenueId>,
    match_index: HashMap<u32, MatchId>,
}

impl Gameplan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_team(&mut self, team: Team) -> Result<TeamId> {
        if self.team_index.contains_key(team.abbr()) {
            return Err(GameplanError::DuplicateKey {
                kind: EntityKind::Team,
                key: team.abbr().to_string(),
            });
        }

        let id = TeamId(self.teams.len());
        tracing::debug!("Adding team {} ({})", team.name(), team.abbr());
        self.team_index.insert(team.abbr().to_string(), id);
        self.teams.push(team);
        Ok(id)
    }

    pub fn add_venue(&mut self, venue: Venue) -> Result<VenueId> {
        if self.venue_index.contains_key(venue.name()) {
            return Err(GameplanError::DuplicateKey {
                kind: EntityKind::Venue,
                key: venue.name().to_string(),
            });
        }

        let id = VenueId(self.venues.len());
        tracing::debug!("Adding venue {} [{}]", venue.name(), venue.sym());
        self.venue_index.insert(venue.name().to_string(), id);
        self.venues.push(venue);
        Ok(id)
    }

    /// Inserts a match into the arena and registers it with both teams and
    /// the venue, in call order.
    pub fn add_match(&mut self, new: NewMatch) -> Result<MatchId> {
        if new.id == 0 {
            return Err(GameplanError::InvalidMatch {
                match_id: new.id,
                reason: "match ids start at 1".to_string(),
            });
        }
        // 只防止越界索引，不是資料驗證
        for team in [new.team_a, new.team_b] {
            if team.0 >= self.teams.len() {
                return Err(GameplanError::InvalidArgument {
                    name: "team".to_string(),
                    value: team.0.to_string(),
                    reason: "team id does not belong to this schedule".to_string(),
                });
            }
        }
        if new.venue.0 >= self.venues.len() {
            return Err(GameplanError::InvalidArgument {
                name: "venue".to_string(),
                value: new.venue.0.to_string(),
                reason: "venue id does not belong to this schedule".to_string(),
            });
        }

        if new.team_a == new.team_b {
            return Err(GameplanError::InvalidMatch {
                match_id: new.id,
                reason: format!(
                    "team '{}' cannot play itself",
                    self.team_by_id(new.team_a).abbr()
                ),
            });
        }
        if self.match_index.contains_key(&new.id) {
            return Err(GameplanError::DuplicateMatchId { match_id: new.id });
        }

        let id = MatchId(self.matches.len());
        tracing::debug!(
            "Adding match {} to teams {} and {}",
            new.id,
            self.teams[new.team_a.0].name(),
            self.teams[new.team_b.0].name()
        );

        self.teams[new.team_a.0].push_match(id);
        self.teams[new.team_b.0].push_match(id);
        self.venues[new.venue.0].push_match(id);
        self.match_index.insert(new.id, id);
        self.matches.push(Match {
            id: new.id,
            match_day: new.match_day,
            weekday: new.weekday,
            date: new.date,
            time: new.time,
            team_a: new.team_a,
            team_b: new.team_b,
            venue: new.venue,
        });
        Ok(id)
    }

    /// Loads teams keyed by abbreviation. A repeated abbreviation aborts the load.
    pub fn load_teams<I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = TeamRow>,
    {
        let mut count = 0;
        for row in rows {
            let team = Team::new(row.name, row.abbr, row.code, row.rank.unwrap_or(0))?;
            self.add_team(team)?;
            count += 1;
        }
        tracing::info!("Loaded {} teams", count);
        Ok(count)
    }

    /// Loads venues keyed by name. A repeated name aborts the load.
    pub fn load_venues<I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = VenueRow>,
    {
        let mut count = 0;
        for row in rows {
            self.add_venue(Venue::new(row.name, row.sym))?;
            count += 1;
        }
        tracing::info!("Loaded {} venues", count);
        Ok(count)
    }

    /// Resolves and inserts fixtures. Rows with unknown references or a
    /// self-match are skipped and reported; a duplicate match id aborts.
    pub fn load_matches<I>(&mut self, rows: I) -> Result<LoadReport>
    where
        I: IntoIterator<Item = FixtureRow>,
    {
        let mut report = LoadReport::default();

        for (index, row) in rows.into_iter().enumerate() {
            let position = if row.line > 0 { row.line } else { index + 1 };
            let outcome = self
                .resolve(&row)
                .and_then(|new_match| self.add_match(new_match));

            match outcome {
                Ok(_) => report.loaded += 1,
                Err(error) if error.is_recoverable() => {
                    tracing::warn!("⚠️  Skipping fixture row {}: {}", position, error);
                    report.skipped.push(SkippedRow {
                        row: position,
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        tracing::info!(
            "Loaded {} matches ({} skipped)",
            report.loaded,
            report.skipped.len()
        );
        Ok(report)
    }

    fn resolve(&self, row: &FixtureRow) -> Result<NewMatch> {
        let unknown = |kind, key: &str| GameplanError::UnknownReference {
            match_id: row.match_id,
            kind,
            key: key.to_string(),
        };

        let team_a = self
            .team_index
            .get(&row.team_a)
            .copied()
            .ok_or_else(|| unknown(EntityKind::Team, &row.team_a))?;
        let team_b = self
            .team_index
            .get(&row.team_b)
            .copied()
            .ok_or_else(|| unknown(EntityKind::Team, &row.team_b))?;
        let venue = self
            .venue_index
            .get(&row.venue)
            .copied()
            .ok_or_else(|| unknown(EntityKind::Venue, &row.venue))?;

        Ok(NewMatch {
            id: row.match_id,
            match_day: row.match_day,
            weekday: row.weekday.clone(),
            date: row.date.clone(),
            time: row.time.clone(),
            team_a,
            team_b,
            venue,
        })
    }

    /// Teams in insertion order.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Matches in insertion (file) order.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn team(&self, abbr: &str) -> Option<&Team> {
        self.team_id(abbr).map(|id| self.team_by_id(id))
    }

    pub fn team_id(&self, abbr: &str) -> Option<TeamId> {
        self.team_index.get(abbr).copied()
    }

    /// # Panics
    /// If `id` was not issued by this registry.
    pub fn team_by_id(&self, id: TeamId) -> &Team {
        &self.teams[id.0]
    }

    pub fn venue(&self, name: &str) -> Option<&Venue> {
        self.venue_index.get(name).map(|id| self.venue_by_id(*id))
    }

    /// # Panics
    /// If `id` was not issued by this registry.
    pub fn venue_by_id(&self, id: VenueId) -> &Venue {
        &self.venues[id.0]
    }

    /// # Panics
    /// If `id` was not issued by this registry.
    pub fn match_at(&self, id: MatchId) -> &Match {
        &self.matches[id.0]
    }

    /// Looks a match up by its match number.
    pub fn match_by_id(&self, match_id: u32) -> Option<&Match> {
        self.match_index.get(&match_id).map(|id| self.match_at(*id))
    }

    pub fn max_match_id(&self) -> u32 {
        self.matches.iter().map(Match::id).max().unwrap_or(0)
    }

    /// Matches sorted ascending by match number.
    pub fn all_matches_by_id(&self) -> Vec<&Match> {
        let mut sorted: Vec<&Match> = self.matches.iter().collect();
        sorted.sort_by_key(|m| m.id());
        sorted
    }

    /// Teams sorted ascending by rank; equal ranks keep insertion order.
    pub fn teams_by_rank(&self) -> Vec<(TeamId, &Team)> {
        let mut sorted: Vec<(TeamId, &Team)> = self
            .teams
            .iter()
            .enumerate()
            .map(|(index, team)| (TeamId(index), team))
            .collect();
        sorted.sort_by_key(|(_, team)| team.rank());
        sorted
    }

    pub fn venue_sequence_by_match_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.all_matches_by_id()
            .into_iter()
            .map(move |m| self.venue_by_id(m.venue()).sym())
    }

    pub fn day_sequence_by_match_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.all_matches_by_id().into_iter().map(Match::weekday)
    }

    /// One team's matches sorted by match number.
    pub fn matches_for_team(&self, abbr: &str) -> Option<Vec<&Match>> {
        self.team(abbr).map(|team| self.sorted_matches(team.matches()))
    }

    pub fn matches_for_venue(&self, name: &str) -> Option<Vec<&Match>> {
        self.venue(name).map(|venue| self.sorted_matches(venue.matches()))
    }

    /// Match numbers the team plays in, in insertion order.
    pub fn match_numbers(&self, team: TeamId) -> Vec<u32> {
        self.team_by_id(team)
            .matches()
            .iter()
            .map(|id| self.match_at(*id).id())
            .collect()
    }

    fn sorted_matches(&self, ids: &[MatchId]) -> Vec<&Match> {
        let mut sorted: Vec<&Match> = ids.iter().map(|id| self.match_at(*id)).collect();
        sorted.sort_by_key(|m| m.id());
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_row(name: &str, abbr: &str, code: &str) -> TeamRow {
        TeamRow {
            name: name.to_string(),
            abbr: abbr.to_string(),
            code: code.to_string(),
            rank: None,
        }
    }

    fn venue_row(name: &str, sym: &str) -> VenueRow {
        VenueRow {
            name: name.to_string(),
            sym: sym.to_string(),
        }
    }

    fn fixture(id: u32, team_a: &str, team_b: &str, venue: &str) -> FixtureRow {
        FixtureRow {
            match_day: id,
            match_id: id,
            weekday: "Mon".to_string(),
            date: "0103".to_string(),
            time: "19:00".to_string(),
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            venue: venue.to_string(),
            line: 0,
        }
    }

    fn league() -> Gameplan {
        let mut gameplan = Gameplan::new();
        gameplan
            .load_teams(vec![
                team_row("Alpha", "A", "1"),
                team_row("Beta", "B", "2"),
                team_row("Gamma", "G", "3"),
                team_row("Delta", "D", "4"),
            ])
            .unwrap();
        gameplan
            .load_venues(vec![venue_row("Stadium1", "S1"), venue_row("Arena", "~")])
            .unwrap();
        gameplan
    }

    #[test]
    fn test_single_match_scenario() {
        let mut gameplan = Gameplan::new();
        gameplan
            .load_teams(vec![team_row("Alpha", "A", "1"), team_row("Beta", "B", "2")])
            .unwrap();
        gameplan.load_venues(vec![venue_row("Stadium1", "S1")]).unwrap();
        let report = gameplan
            .load_matches(vec![fixture(1, "A", "B", "Stadium1")])
            .unwrap();

        assert_eq!(report.loaded, 1);
        assert!(report.is_clean());

        let m = gameplan.match_by_id(1).unwrap();
        assert_eq!(gameplan.team_by_id(m.team_a()).name(), "Alpha");
        assert_eq!(gameplan.team_by_id(m.team_b()).name(), "Beta");
        assert_eq!(gameplan.venue_by_id(m.venue()).sym(), "S1");

        let names: Vec<&str> = gameplan
            .teams_by_rank()
            .into_iter()
            .map(|(_, t)| t.name())
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_back_references_are_bidirectional() {
        let mut gameplan = league();
        gameplan
            .load_matches(vec![
                fixture(1, "A", "B", "Stadium1"),
                fixture(2, "G", "D", "Arena"),
                fixture(3, "A", "G", "Arena"),
                fixture(4, "B", "D", "Stadium1"),
            ])
            .unwrap();

        for (index, team) in gameplan.teams().iter().enumerate() {
            let id = TeamId(index);
            for match_id in team.matches() {
                assert!(gameplan.match_at(*match_id).involves(id));
            }
            let playing = gameplan.matches().iter().filter(|m| m.involves(id)).count();
            assert_eq!(playing, team.matches().len());
        }

        for (index, venue) in gameplan.venues().iter().enumerate() {
            let hosted = gameplan
                .matches()
                .iter()
                .filter(|m| m.venue() == VenueId(index))
                .count();
            assert_eq!(hosted, venue.matches().len());
        }
    }

    #[test]
    fn test_unknown_reference_is_skipped_not_fatal() {
        let mut gameplan = league();
        let mut rows: Vec<FixtureRow> = (1..=10)
            .map(|id| {
                if id % 2 == 0 {
                    fixture(id, "A", "B", "Stadium1")
                } else {
                    fixture(id, "G", "D", "Arena")
                }
            })
            .collect();
        rows.insert(4, fixture(11, "A", "G", "Nowhere"));

        let report = gameplan.load_matches(rows).unwrap();

        assert_eq!(report.loaded, 10);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row, 5);
        assert!(matches!(
            report.skipped[0].error,
            GameplanError::UnknownReference {
                match_id: 11,
                kind: EntityKind::Venue,
                ..
            }
        ));
        assert_eq!(gameplan.matches().len(), 10);
    }

    #[test]
    fn test_self_match_is_skipped() {
        let mut gameplan = league();
        let report = gameplan
            .load_matches(vec![
                fixture(1, "A", "A", "Stadium1"),
                fixture(2, "A", "B", "Stadium1"),
            ])
            .unwrap();

        assert_eq!(report.loaded, 1);
        assert!(matches!(
            report.skipped[0].error,
            GameplanError::InvalidMatch { match_id: 1, .. }
        ));
        assert!(gameplan.team("A").unwrap().matches().len() == 1);
    }

    #[test]
    fn test_duplicate_keys_are_fatal() {
        let mut gameplan = Gameplan::new();
        let result =
            gameplan.load_teams(vec![team_row("Alpha", "A", "1"), team_row("Other", "A", "9")]);
        assert!(matches!(
            result,
            Err(GameplanError::DuplicateKey {
                kind: EntityKind::Team,
                ..
            })
        ));

        let result = gameplan.load_venues(vec![venue_row("Home", "H"), venue_row("Home", "X")]);
        assert!(matches!(
            result,
            Err(GameplanError::DuplicateKey {
                kind: EntityKind::Venue,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_match_id_aborts_load() {
        let mut gameplan = league();
        let result = gameplan.load_matches(vec![
            fixture(1, "A", "B", "Stadium1"),
            fixture(1, "G", "D", "Arena"),
        ]);
        assert!(matches!(
            result,
            Err(GameplanError::DuplicateMatchId { match_id: 1 })
        ));
    }

    #[test]
    fn test_all_matches_by_id_is_sorted_and_idempotent() {
        let mut gameplan = league();
        gameplan
            .load_matches(vec![
                fixture(3, "A", "B", "Stadium1"),
                fixture(1, "G", "D", "Arena"),
                fixture(2, "A", "G", "Arena"),
            ])
            .unwrap();

        let first: Vec<u32> = gameplan.all_matches_by_id().iter().map(|m| m.id()).collect();
        let second: Vec<u32> = gameplan.all_matches_by_id().iter().map(|m| m.id()).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
        assert_eq!(gameplan.max_match_id(), 3);
    }

    #[test]
    fn test_teams_by_rank_is_stable() {
        let mut gameplan = Gameplan::new();
        gameplan
            .load_teams(vec![
                TeamRow {
                    rank: Some(2),
                    ..team_row("Alpha", "A", "1")
                },
                team_row("Beta", "B", "2"),
                TeamRow {
                    rank: Some(1),
                    ..team_row("Gamma", "G", "3")
                },
                team_row("Delta", "D", "4"),
            ])
            .unwrap();

        let order: Vec<&str> = gameplan
            .teams_by_rank()
            .into_iter()
            .map(|(_, t)| t.abbr())
            .collect();
        assert_eq!(order, vec!["B", "D", "G", "A"]);
    }

    #[test]
    fn test_sequences_follow_match_order() {
        let mut gameplan = league();
        let mut late = fixture(2, "A", "G", "Arena");
        late.weekday = "Sun".to_string();
        gameplan
            .load_matches(vec![late, fixture(1, "A", "B", "Stadium1")])
            .unwrap();

        let venues: Vec<&str> = gameplan.venue_sequence_by_match_order().collect();
        let days: Vec<&str> = gameplan.day_sequence_by_match_order().collect();
        assert_eq!(venues, vec!["S1", "~"]);
        assert_eq!(days, vec!["Mon", "Sun"]);
    }

    #[test]
    fn test_matches_for_team_sorted_by_id() {
        let mut gameplan = league();
        gameplan
            .load_matches(vec![
                fixture(5, "A", "B", "Stadium1"),
                fixture(2, "A", "G", "Arena"),
                fixture(3, "G", "D", "Arena"),
            ])
            .unwrap();

        let ids: Vec<u32> = gameplan
            .matches_for_team("A")
            .unwrap()
            .iter()
            .map(|m| m.id())
            .collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(gameplan.match_numbers(gameplan.team_id("A").unwrap()), vec![5, 2]);
        assert_eq!(gameplan.matches_for_venue("Arena").unwrap().len(), 2);
        assert!(gameplan.matches_for_team("ZZ").is_none());
    }
}
