//! Match density over a window of match numbers.
//!
//! A team's presence sequence marks, for every match number in the window,
//! whether the team plays that match. The density sequence is computed by
//! scanning the presence sequence backwards from the last slot:
//!
//! - an occupied slot increments a running count and contributes that count;
//! - an empty slot after the first occupied one contributes
//!   `max(0, count - decay)`, and resets the count to zero once the gap to
//!   the last occupied slot exceeds `max_offset`;
//! - empty slots before any occupied one contribute zero.
//!
//! The result is reversed back into chronological order. Its first element
//! is the team's density score.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::utils::error::{GameplanError, Result};

/// Tuning constants of the recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityParams {
    /// Largest gap (in slots) that keeps the running count alive.
    pub max_offset: usize,
    /// Amount subtracted from the running count on empty slots.
    pub decay: f64,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            max_offset: 2,
            decay: 0.5,
        }
    }
}

/// The one-based, inclusive `[start, max_matches]` range of match numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    start: usize,
    max_matches: usize,
}

impl Window {
    /// Highest match number a window can reach. Larger ends are clamped.
    pub const MAX_MATCH_NUMBER: usize = u16::MAX as usize;

    /// `start` must be at least 1. `max_matches < start` is allowed and
    /// gives an empty window; `max_matches` above [`Self::MAX_MATCH_NUMBER`]
    /// is clamped.
    pub fn new(start: usize, max_matches: usize) -> Result<Self> {
        if start == 0 {
            return Err(GameplanError::InvalidArgument {
                name: "start".to_string(),
                value: start.to_string(),
                reason: "window start is one-based".to_string(),
            });
        }
        Ok(Self {
            start,
            max_matches: max_matches.min(Self::MAX_MATCH_NUMBER),
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn max_matches(&self) -> usize {
        self.max_matches
    }

    pub fn len(&self) -> usize {
        self.max_matches.saturating_add(1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn match_numbers(&self) -> RangeInclusive<usize> {
        self.start..=self.max_matches
    }
}

/// Occupied flags for each match number in the window.
pub fn presence_sequence<I>(match_numbers: I, window: Window) -> Vec<bool>
where
    I: IntoIterator<Item = u32>,
{
    let played: HashSet<u32> = match_numbers.into_iter().collect();
    window
        .match_numbers()
        .map(|number| u32::try_from(number).is_ok_and(|n| played.contains(&n)))
        .collect()
}

pub fn density_sequence(presence: &[bool], params: DensityParams) -> Vec<f64> {
    let mut count: u32 = 0;
    let mut last_match_offset: Option<usize> = None;
    let mut density = Vec::with_capacity(presence.len());

    for (idx, &occupied) in presence.iter().rev().enumerate() {
        let contribution = if occupied {
            count += 1;
            last_match_offset = Some(idx);
            f64::from(count)
        } else if let Some(last) = last_match_offset {
            if idx - last > params.max_offset {
                count = 0;
            }
            (f64::from(count) - params.decay).max(0.0)
        } else {
            0.0
        };
        density.push(contribution);
    }

    density.reverse();
    density
}

/// First element of the density sequence, or 0 when the window is empty.
pub fn density_score(density: &[f64]) -> f64 {
    density.first().copied().unwrap_or(0.0)
}

/// Presence, density and score of one team over a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityProfile {
    pub presence: Vec<bool>,
    pub density: Vec<f64>,
    pub score: f64,
}

impl DensityProfile {
    pub fn compute<I>(match_numbers: I, window: Window, params: DensityParams) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let presence = presence_sequence(match_numbers, window);
        let density = density_sequence(&presence, params);
        let score = density_score(&density);
        Self {
            presence,
            density,
            score,
        }
    }
}
