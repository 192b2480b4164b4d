//! Grid interpolation (stage two of the heatmap)
//!
//! Resamples smoothed shot points onto an integer grid with bounded-radius
//! inverse distance weighting. Every cell is independent, so rows are fanned
//! out over Rayon; output is always row-major regardless of the path taken.
//!
//! A point sitting on a grid node (closer than the grid epsilon) wins that
//! cell outright instead of being blended. When several points coincide on
//! the same node the first one in input order wins.

use rayon::prelude::*;
use tracing::debug;

use crate::constants::{DEFAULT_GRID_SIZE, GRID_EPSILON};
use crate::error::{HeatmapError, HeatmapResult, check_power};
use crate::points::{GridCell, SmoothedPoint, clamp_value, distance};
use crate::smoothing::sanitize_radius;

/// Output grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub width: usize,
    pub height: usize,
}

impl GridDims {
    pub fn square(size: usize) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    fn validate(&self) -> HeatmapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeatmapError::InvalidGridSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_SIZE)
    }
}

/// Stage-two IDW gridder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInterpolator {
    power: f64,
    search_radius: f64,
    epsilon: f64,
    dims: GridDims,
    parallel: bool,
}

impl GridInterpolator {
    pub fn new(power: f64, search_radius: f64, dims: GridDims) -> HeatmapResult<Self> {
        check_power(power)?;
        dims.validate()?;
        Ok(Self {
            power,
            search_radius: sanitize_radius(search_radius),
            epsilon: GRID_EPSILON,
            dims,
            parallel: true,
        })
    }

    /// Override the distance under which a point counts as sitting on a node.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Evaluate rows on the Rayon pool (default) or on the calling thread.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn search_radius(&self) -> f64 {
        self.search_radius
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Produce the sparse grid: only cells with a non-zero value are emitted,
    /// ordered by row (`i`) then column (`j`).
    pub fn interpolate(&self, points: &[SmoothedPoint]) -> Vec<GridCell> {
        let valid: Vec<&SmoothedPoint> = points.iter().filter(|p| p.is_informative()).collect();
        if valid.is_empty() {
            debug!("Interpolation: no informative points, nothing to render");
            return Vec::new();
        }

        let cells: Vec<GridCell> = if self.parallel {
            (0..self.dims.height)
                .into_par_iter()
                .map(|i| self.interpolate_row(i, &valid))
                .collect::<Vec<_>>()
                .concat()
        } else {
            (0..self.dims.height)
                .flat_map(|i| self.interpolate_row(i, &valid))
                .collect()
        };

        debug!(
            "Interpolation: {} points -> {}/{} non-zero cells ({}x{}, radius={})",
            valid.len(),
            cells.len(),
            self.dims.cell_count(),
            self.dims.width,
            self.dims.height,
            self.search_radius
        );
        cells
    }

    fn interpolate_row(&self, i: usize, points: &[&SmoothedPoint]) -> Vec<GridCell> {
        (0..self.dims.width)
            .filter_map(|j| {
                let value = self.cell_value(j as f64, i as f64, points);
                (value != 0.0).then_some(GridCell { j, i, value })
            })
            .collect()
    }

    /// Value at grid node `(tx, ty)`; 0 when no point is within reach.
    fn cell_value(&self, tx: f64, ty: f64, points: &[&SmoothedPoint]) -> f64 {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for point in points {
            let d = distance(point.x, point.y, tx, ty);
            if d > self.search_radius {
                continue;
            }
            if d < self.epsilon {
                return clamp_value(point.value);
            }
            let weight = 1.0 / d.powf(self.power);
            weighted_sum += point.value * weight;
            total_weight += weight;
        }

        if total_weight == 0.0 {
            0.0
        } else {
            clamp_value(weighted_sum / total_weight)
        }
    }
}

/// Grid `points` onto a `size`x`size` grid with the default node epsilon.
pub fn interpolate(
    points: &[SmoothedPoint],
    power: f64,
    search_radius: f64,
    size: usize,
) -> HeatmapResult<Vec<GridCell>> {
    Ok(GridInterpolator::new(power, search_radius, GridDims::square(size))?.interpolate(points))
}
