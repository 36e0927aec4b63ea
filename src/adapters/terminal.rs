//! ANSI terminal output.
//!
//! Heat map layout, one line per team:
//! - the team abbreviation in the team's color
//! - `*` for each match the team plays, dimmed once the match is completed
//! - `=` in the team's color for each match it does not play
//!
//! Two footer lines follow, aligned to the same columns: venue symbols and
//! the first letter of each weekday.

use chrono::NaiveDate;
use owo_colors::{OwoColorize, XtermColors};

use crate::core::heat_map::HeatMap;
use crate::core::registry::Gameplan;
use crate::domain::model::{Match, MatchStatus};
use crate::domain::ports::Renderer;
use crate::utils::error::Result;

/// Venue symbol colors, assigned in venue file order.
const VENUE_PALETTE: [u8; 6] = [154, 9, 46, 33, 208, 201];

/// A team color code: an xterm-256 index or a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamColor {
    Xterm(u8),
    Rgb(u8, u8, u8),
}

impl TeamColor {
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if let Some(hex) = code.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            return Some(TeamColor::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }
        code.parse().ok().map(TeamColor::Xterm)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    color: bool,
    as_of: Option<NaiveDate>,
}

impl TerminalRenderer {
    pub fn new(color: bool, as_of: Option<NaiveDate>) -> Self {
        Self { color, as_of }
    }

    fn paint(&self, text: &str, color: Option<TeamColor>) -> String {
        match (self.color, color) {
            (true, Some(TeamColor::Xterm(code))) => text.color(XtermColors::from(code)).to_string(),
            (true, Some(TeamColor::Rgb(r, g, b))) => text.truecolor(r, g, b).to_string(),
            _ => text.to_string(),
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }

    fn is_completed(&self, m: &Match) -> bool {
        match self.as_of {
            Some(as_of) => matches!(m.status(as_of), Ok(MatchStatus::Completed)),
            None => false,
        }
    }

    fn venue_color(&self, gameplan: &Gameplan, sym: &str) -> Option<TeamColor> {
        gameplan
            .venues()
            .iter()
            .position(|venue| venue.sym() == sym)
            .map(|index| TeamColor::Xterm(VENUE_PALETTE[index % VENUE_PALETTE.len()]))
    }

    /// Match list in the classic block layout, sorted by match number.
    pub fn render_matches(&self, gameplan: &Gameplan, matches: &[&Match]) -> String {
        let mut out = String::new();
        for m in matches {
            let team_a = gameplan.team_by_id(m.team_a());
            let team_b = gameplan.team_by_id(m.team_b());
            let venue = gameplan.venue_by_id(m.venue());

            let mut header = format!("Match {} - {} {} {}", m.id(), m.weekday(), m.date(), m.time());
            if self.is_completed(m) {
                header = self.dim(&format!("{} (completed)", header));
            }

            out.push('\n');
            out.push_str(&header);
            out.push('\n');
            out.push_str(&format!(
                "{}\t\tvs\t\t{}\n",
                self.paint(team_a.name(), TeamColor::parse(team_a.code())),
                self.paint(team_b.name(), TeamColor::parse(team_b.code()))
            ));
            out.push_str(venue.name());
            out.push('\n');
        }
        out
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, gameplan: &Gameplan, heat_map: &HeatMap) -> Result<String> {
        let mut out = String::new();

        for row in &heat_map.rows {
            let team_color = TeamColor::parse(&row.code);
            let cells: String = row
                .presence
                .iter()
                .zip(&heat_map.slots)
                .map(|(&occupied, slot)| {
                    if !occupied {
                        return self.paint("=", team_color);
                    }
                    let completed = u32::try_from(slot.number)
                        .ok()
                        .and_then(|n| gameplan.match_by_id(n))
                        .is_some_and(|m| self.is_completed(m));
                    if completed {
                        self.dim("*")
                    } else {
                        "*".to_string()
                    }
                })
                .collect();

            out.push_str(&format!("{}\t\t{}\n", self.paint(&row.abbr, team_color), cells));
        }

        let venues: String = heat_map
            .slots
            .iter()
            .map(|slot| match &slot.venue_sym {
                Some(sym) => self.paint(sym, self.venue_color(gameplan, sym)),
                None => " ".to_string(),
            })
            .collect();
        out.push_str(&format!("\t\t{}\n", venues));

        let days: String = heat_map
            .slots
            .iter()
            .map(|slot| match slot.weekday.as_deref().and_then(|d| d.chars().next()) {
                Some(initial) => {
                    let label = initial.to_string();
                    let weekend = matches!(slot.weekday.as_deref(), Some("Sat" | "Sun"));
                    if weekend {
                        self.paint(&label, Some(TeamColor::Xterm(11)))
                    } else {
                        label
                    }
                }
                None => " ".to_string(),
            })
            .collect();
        out.push_str(&format!("\t\t{}\n", days));

        Ok(out)
    }
}
