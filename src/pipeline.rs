//! Heatmap pipeline: raw shots -> smoothed points -> sparse grid
//!
//! Each call recomputes from scratch; nothing is cached between requests.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{VALUE_MAX, VALUE_MIN};
use crate::court::{CourtLayout, CourtShot, MatchShots, select_shots};
use crate::error::HeatmapResult;
use crate::interpolation::{GridDims, GridInterpolator};
use crate::points::{GridCell, ShotPoint};
use crate::settings::HeatmapSettings;
use crate::smoothing::PointSmoother;

/// What the renderer receives: sparse cells plus the fixed color scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapData {
    pub min: f64,
    pub max: f64,
    pub width: usize,
    pub height: usize,
    pub data: Vec<GridCell>,
}

impl HeatmapData {
    pub fn from_cells(dims: GridDims, data: Vec<GridCell>) -> Self {
        Self {
            min: VALUE_MIN,
            max: VALUE_MAX,
            width: dims.width,
            height: dims.height,
            data,
        }
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major dense grid; unlisted cells are 0.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut values = vec![0.0; self.width * self.height];
        for cell in &self.data {
            if cell.j < self.width && cell.i < self.height {
                values[cell.i * self.width + cell.j] = cell.value;
            }
        }
        values
    }

    /// `x,y,value` text, one listed cell per line.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("x,y,value\n");
        for cell in &self.data {
            out.push_str(&format!("{},{},{:.2}\n", cell.j, cell.i, cell.value));
        }
        out
    }
}

/// Smoother, gridder and court mapping configured together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapPipeline {
    smoother: PointSmoother,
    interpolator: GridInterpolator,
    court: CourtLayout,
}

impl HeatmapPipeline {
    pub fn new(smoother: PointSmoother, interpolator: GridInterpolator, court: CourtLayout) -> Self {
        Self {
            smoother,
            interpolator,
            court,
        }
    }

    /// Build both stages from settings. The smoothing radius doubles as the
    /// gridding search radius.
    pub fn from_settings(settings: &HeatmapSettings) -> HeatmapResult<Self> {
        settings.validate()?;
        let smoother = PointSmoother::new(settings.power, settings.smoothing_radius)?
            .with_epsilon(settings.smoothing_epsilon);
        let interpolator =
            GridInterpolator::new(settings.power, settings.smoothing_radius, settings.grid_dims())?
                .with_epsilon(settings.grid_epsilon)
                .with_parallel(settings.parallel);
        Ok(Self::new(smoother, interpolator, settings.court))
    }

    pub fn court(&self) -> &CourtLayout {
        &self.court
    }

    /// Run both stages over already-mapped points.
    pub fn run(&self, points: &[ShotPoint]) -> HeatmapResult<HeatmapData> {
        for point in points {
            point.validate()?;
        }

        let start = Instant::now();
        let smoothed = self.smoother.smooth(points);
        let smoothed_at = start.elapsed();
        let cells = self.interpolator.interpolate(&smoothed);

        debug!(
            "Heatmap: {} shots, {} smoothed, {} cells (smooth {:?}, grid {:?})",
            points.len(),
            smoothed.len(),
            cells.len(),
            smoothed_at,
            start.elapsed() - smoothed_at
        );
        Ok(HeatmapData::from_cells(self.interpolator.dims(), cells))
    }

    /// Map court shots through the layout, then run both stages.
    pub fn run_court(&self, shots: &[CourtShot]) -> HeatmapResult<HeatmapData> {
        self.run(&self.court.map_shots(shots))
    }

    /// Heatmap for the selected matches (all of them when `selected_ids` is empty).
    pub fn run_matches(
        &self,
        matches: &[MatchShots],
        selected_ids: &[String],
    ) -> HeatmapResult<HeatmapData> {
        let shots = select_shots(matches, selected_ids);
        debug!(
            "Heatmap: {} shots from {} matches ({} selected)",
            shots.len(),
            matches.len(),
            selected_ids.len()
        );
        self.run_court(&shots)
    }
}
