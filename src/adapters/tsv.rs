//! Tab-separated input files.
//!
//! None of the files carry a header row. Blank lines are ignored and fields
//! are trimmed. A bad team or venue line aborts; a bad fixture line is
//! collected and the rest of the file still loads.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::core::registry::SkippedRow;
use crate::domain::model::{FixtureRow, TeamRow, VenueRow};
use crate::utils::error::{GameplanError, Result};

/// Parsed rows plus the lines that could not be parsed.
#[derive(Debug)]
pub struct RowSet<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<SkippedRow>,
}

impl<T> Default for RowSet<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

fn records(data: &[u8]) -> Result<Vec<(usize, StringRecord)>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(data);

    let mut out = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(out.len() + 1);
        out.push((line, record));
    }
    Ok(out)
}

fn malformed(file: &str, line: usize, reason: impl Into<String>) -> GameplanError {
    GameplanError::MalformedRow {
        file: file.to_string(),
        line,
        reason: reason.into(),
    }
}

fn expect_columns(file: &str, line: usize, record: &StringRecord, allowed: &[usize]) -> Result<()> {
    if allowed.contains(&record.len()) {
        return Ok(());
    }
    let expected: Vec<String> = allowed.iter().map(ToString::to_string).collect();
    Err(malformed(
        file,
        line,
        format!(
            "expected {} columns, found {}",
            expected.join(" or "),
            record.len()
        ),
    ))
}

fn number<T: std::str::FromStr>(file: &str, line: usize, column: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| malformed(file, line, format!("{} '{}' is not a number", column, value)))
}

/// Team and venue lines are reference data, so a bad one aborts the load.
fn reference_data(error: GameplanError) -> GameplanError {
    match error {
        GameplanError::MalformedRow { file, line, reason } => {
            GameplanError::ReferenceDataError { file, line, reason }
        }
        other => other,
    }
}

/// `name, abbreviation, colorCode[, rank]`
pub fn parse_teams(data: &[u8], file: &str) -> Result<Vec<TeamRow>> {
    let mut rows = Vec::new();
    for (line, record) in records(data)? {
        rows.push(team_row(file, line, &record).map_err(reference_data)?);
    }
    tracing::debug!("Parsed {} team rows from {}", rows.len(), file);
    Ok(rows)
}

fn team_row(file: &str, line: usize, record: &StringRecord) -> Result<TeamRow> {
    expect_columns(file, line, record, &[3, 4])?;
    let rank = match record.get(3) {
        Some(value) => Some(number(file, line, "rank", value)?),
        None => None,
    };
    Ok(TeamRow {
        name: record[0].to_string(),
        abbr: record[1].to_string(),
        code: record[2].to_string(),
        rank,
    })
}

/// `name, symbol`
pub fn parse_venues(data: &[u8], file: &str) -> Result<Vec<VenueRow>> {
    let mut rows = Vec::new();
    for (line, record) in records(data)? {
        expect_columns(file, line, &record, &[2]).map_err(reference_data)?;
        rows.push(VenueRow {
            name: record[0].to_string(),
            sym: record[1].to_string(),
        });
    }
    tracing::debug!("Parsed {} venue rows from {}", rows.len(), file);
    Ok(rows)
}

/// `matchDay, matchId, weekday, date, time, teamA, teamB, venue`
pub fn parse_fixtures(data: &[u8], file: &str) -> Result<RowSet<FixtureRow>> {
    let mut set = RowSet::default();
    for (line, record) in records(data)? {
        match fixture_row(file, line, &record) {
            Ok(row) => set.rows.push(row),
            Err(error) => {
                tracing::warn!("⚠️  {}", error);
                set.rejected.push(SkippedRow { row: line, error });
            }
        }
    }
    tracing::debug!(
        "Parsed {} fixture rows from {} ({} rejected)",
        set.rows.len(),
        file,
        set.rejected.len()
    );
    Ok(set)
}

fn fixture_row(file: &str, line: usize, record: &StringRecord) -> Result<FixtureRow> {
    expect_columns(file, line, record, &[8])?;
    Ok(FixtureRow {
        match_day: number(file, line, "match day", &record[0])?,
        match_id: number(file, line, "match id", &record[1])?,
        weekday: record[2].to_string(),
        date: record[3].to_string(),
        time: record[4].to_string(),
        team_a: record[5].to_string(),
        team_b: record[6].to_string(),
        venue: record[7].to_string(),
        line,
    })
}
