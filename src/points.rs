//! Point and cell records passed between the heatmap stages
//!
//! All three types are plain `Copy` values. Coordinates are in the pixel
//! space produced by [`crate::court::CourtLayout`]; values live on the
//! `[VALUE_MIN, VALUE_MAX]` scale.

use serde::{Deserialize, Serialize};

use crate::constants::{VALUE_MAX, VALUE_MIN};
use crate::error::{HeatmapError, HeatmapResult};

/// One observed shot attempt, already mapped into grid coordinates.
///
/// A value of exactly 0 marks the point as a no-op: both stages drop it
/// before any weighting happens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl ShotPoint {
    /// Build a point, rejecting negative or non-finite input.
    pub fn new(x: f64, y: f64, value: f64) -> HeatmapResult<Self> {
        let point = Self { x, y, value };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        let reason = if !self.x.is_finite() || !self.y.is_finite() {
            "coordinates must be finite"
        } else if !self.value.is_finite() {
            "value must be finite"
        } else if self.value < 0.0 {
            "value must not be negative"
        } else {
            return Ok(());
        };
        Err(HeatmapError::InvalidPoint {
            x: self.x,
            y: self.y,
            value: self.value,
            reason,
        })
    }

    /// Whether this point takes part in weighting at all.
    pub fn is_informative(&self) -> bool {
        self.value != 0.0
    }
}

/// A shot point whose value has been replaced by its local weighted average.
///
/// Only [`crate::smoothing::PointSmoother`] creates these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl SmoothedPoint {
    pub fn is_informative(&self) -> bool {
        self.value != 0.0
    }
}

/// One non-zero sample of the output grid.
///
/// `i` is the row and `j` the column. On the wire the renderer expects
/// `{x, y, value}`, so `j` serializes as `x` and `i` as `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    #[serde(rename = "x")]
    pub j: usize,
    #[serde(rename = "y")]
    pub i: usize,
    pub value: f64,
}

/// Euclidean distance between two positions.
#[inline]
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

/// Clamp a weighted average onto the renderer scale.
#[inline]
pub fn clamp_value(value: f64) -> f64 {
    value.clamp(VALUE_MIN, VALUE_MAX)
}
