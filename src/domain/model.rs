//! Schedule entities and the raw rows they are built from.
//!
//! Teams and venues never own matches. They keep [`MatchId`] back-references
//! into the match arena held by [`crate::core::registry::Gameplan`], which is
//! the only place those lists are appended to.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::error::{GameplanError, Result};

/// Index of a team in the registry's team arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub(crate) usize);

/// Index of a venue in the registry's venue arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VenueId(pub(crate) usize);

/// Index of a match in the registry's match arena (file order, not match number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct Team {
    name: String,
    abbr: String,
    code: String,
    rank: i32,
    matches: Vec<MatchId>,
}

impl Team {
    /// Creates a team with no matches. The abbreviation is the registry key
    /// and must not be blank.
    pub fn new(
        name: impl Into<String>,
        abbr: impl Into<String>,
        code: impl Into<String>,
        rank: i32,
    ) -> Result<Self> {
        let abbr = abbr.into();
        if abbr.trim().is_empty() {
            return Err(GameplanError::InvalidArgument {
                name: "abbr".to_string(),
                value: abbr,
                reason: "team abbreviation cannot be empty".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            abbr,
            code: code.into(),
            rank,
            matches: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbr(&self) -> &str {
        &self.abbr
    }

    /// Display color token, passed through verbatim.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn rank(&self) -> i32 {
        self.rank
    }

    /// Back-references in insertion order.
    pub fn matches(&self) -> &[MatchId] {
        &self.matches
    }

    pub(crate) fn push_match(&mut self, id: MatchId) {
        self.matches.push(id);
    }
}

#[derive(Debug, Clone)]
pub struct Venue {
    name: String,
    sym: String,
    matches: Vec<MatchId>,
}

impl Venue {
    pub fn new(name: impl Into<String>, sym: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sym: sym.into(),
            matches: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sym(&self) -> &str {
        &self.sym
    }

    pub fn matches(&self) -> &[MatchId] {
        &self.matches
    }

    pub(crate) fn push_match(&mut self, id: MatchId) {
        self.matches.push(id);
    }
}

/// A single fixture. Only the registry constructs these.
#[derive(Debug, Clone)]
pub struct Match {
    pub(crate) id: u32,
    pub(crate) match_day: u32,
    pub(crate) weekday: String,
    pub(crate) date: String,
    pub(crate) time: String,
    pub(crate) team_a: TeamId,
    pub(crate) team_b: TeamId,
    pub(crate) venue: VenueId,
}

impl Match {
    /// Match number, 1-based, unique within a schedule.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn match_day(&self) -> u32 {
        self.match_day
    }

    pub fn weekday(&self) -> &str {
        &self.weekday
    }

    /// Date label in `ddmm` form.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn team_a(&self) -> TeamId {
        self.team_a
    }

    pub fn team_b(&self) -> TeamId {
        self.team_b
    }

    pub fn teams(&self) -> [TeamId; 2] {
        [self.team_a, self.team_b]
    }

    pub fn venue(&self) -> VenueId {
        self.venue
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// Resolves the `ddmm` label against a year. Short labels are left-padded
    /// with zeros, so `"103"` is the 1st of March.
    pub fn calendar_date(&self, year: i32) -> Result<NaiveDate> {
        parse_ddmm(&self.date, year)
    }

    /// Completed when the match date is on or before `as_of`, so a match
    /// played today counts as completed. The year is taken from `as_of`.
    pub fn status(&self, as_of: NaiveDate) -> Result<MatchStatus> {
        let date = self.calendar_date(as_of.year())?;
        Ok(if date <= as_of {
            MatchStatus::Completed
        } else {
            MatchStatus::Upcoming
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Completed,
    Upcoming,
}

pub fn parse_ddmm(label: &str, year: i32) -> Result<NaiveDate> {
    let trimmed = label.trim();
    let invalid = |reason: &str| GameplanError::InvalidArgument {
        name: "date".to_string(),
        value: label.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() || trimmed.len() > 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("expected up to four digits in ddmm form"));
    }

    let padded = format!("{:0>4}", trimmed);
    let day: u32 = padded[..2].parse().map_err(|_| invalid("bad day"))?;
    let month: u32 = padded[2..].parse().map_err(|_| invalid("bad month"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such calendar date"))
}

/// A `teams.tsv` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRow {
    pub name: String,
    pub abbr: String,
    pub code: String,
    #[serde(default)]
    pub rank: Option<i32>,
}

/// A `venues.tsv` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRow {
    pub name: String,
    pub sym: String,
}

/// A `fixtures.tsv` line, with team and venue still unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRow {
    pub match_day: u32,
    pub match_id: u32,
    pub weekday: String,
    pub date: String,
    pub time: String,
    pub team_a: String,
    pub team_b: String,
    pub venue: String,
    /// 1-based line in the source file; 0 when the row was built in memory.
    #[serde(skip)]
    pub line: usize,
}
