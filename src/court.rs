//! Court-to-grid adaptation
//!
//! Per-game shot charts arrive with court-fraction coordinates in `[0, 1]`
//! and a made/missed flag. This module picks the shots for the selected
//! matches and maps them into the pixel space the heatmap stages work in.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{COURT_HEIGHT, COURT_PADDING, COURT_WIDTH, MADE_VALUE, MISSED_VALUE};
use crate::points::ShotPoint;

/// One shot as recorded in a game's shot chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtShot {
    /// Fraction of the court width; 0 maps to the right edge of the grid.
    pub x: f64,
    /// Fraction of the court height; 0 maps to the bottom edge of the grid.
    pub y: f64,
    pub made: bool,
}

/// All shots recorded for a single match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchShots {
    pub match_id: String,
    #[serde(default)]
    pub shots: Vec<CourtShot>,
}

/// Gather the shots of the selected matches, in match order.
///
/// An empty selection means every match.
pub fn select_shots(matches: &[MatchShots], selected_ids: &[String]) -> Vec<CourtShot> {
    let selected: HashSet<&str> = selected_ids.iter().map(String::as_str).collect();
    matches
        .iter()
        .filter(|m| selected.is_empty() || selected.contains(m.match_id.as_str()))
        .flat_map(|m| m.shots.iter().copied())
        .collect()
}

/// Pixel geometry of the rendered court and the value assigned to each outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtLayout {
    pub width: f64,
    pub height: f64,
    /// Total inset; half of it is applied on each edge.
    pub padding: f64,
    pub made_value: f64,
    pub missed_value: f64,
}

impl Default for CourtLayout {
    fn default() -> Self {
        Self {
            width: COURT_WIDTH,
            height: COURT_HEIGHT,
            padding: COURT_PADDING,
            made_value: MADE_VALUE,
            missed_value: MISSED_VALUE,
        }
    }
}

impl CourtLayout {
    /// Map a court shot to integer pixel coordinates.
    ///
    /// Both axes are mirrored: court x = 0 lands on the right edge and
    /// court y = 0 on the bottom edge, inset by half the padding.
    pub fn to_shot_point(&self, shot: &CourtShot) -> Option<ShotPoint> {
        if !shot.x.is_finite() || !shot.y.is_finite() {
            warn!("Court: skipping shot with non-finite position ({}, {})", shot.x, shot.y);
            return None;
        }
        let half_pad = self.padding * 0.5;
        let x = (self.width - shot.x * (self.width - self.padding) - half_pad).round();
        let y = (self.height - shot.y * (self.height - self.padding) - half_pad).round();
        let value = if shot.made {
            self.made_value
        } else {
            self.missed_value
        };
        Some(ShotPoint { x, y, value })
    }

    pub fn map_shots(&self, shots: &[CourtShot]) -> Vec<ShotPoint> {
        shots.iter().filter_map(|s| self.to_shot_point(s)).collect()
    }
}
