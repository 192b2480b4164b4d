//! Heatmap settings
//!
//! Loaded from a TOML file (see `DEFAULT_SETTINGS_FILE`). Every field has a
//! serde default so a partial file only overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::*;
use crate::court::CourtLayout;
use crate::error::{HeatmapError, HeatmapResult, check_power};
use crate::interpolation::GridDims;

fn default_power() -> f64 {
    DEFAULT_POWER
}
fn default_smoothing_radius() -> f64 {
    DEFAULT_SMOOTHING_RADIUS
}
fn default_smoothing_epsilon() -> f64 {
    SMOOTHING_EPSILON
}
fn default_grid_epsilon() -> f64 {
    GRID_EPSILON
}
fn default_parallel() -> bool {
    true
}

/// Per-invocation heatmap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSettings {
    /// Distance-decay exponent for both stages
    #[serde(default = "default_power")]
    pub power: f64,
    /// Smoothing radius, also the gridding search radius
    #[serde(default = "default_smoothing_radius")]
    pub smoothing_radius: f64,
    /// Square grid resolution; unset means one cell per court pixel of width
    #[serde(default)]
    pub grid_size: Option<usize>,
    /// Overrides `grid_size` on the x axis
    #[serde(default)]
    pub grid_width: Option<usize>,
    /// Overrides `grid_size` on the y axis
    #[serde(default)]
    pub grid_height: Option<usize>,
    #[serde(default = "default_smoothing_epsilon")]
    pub smoothing_epsilon: f64,
    #[serde(default = "default_grid_epsilon")]
    pub grid_epsilon: f64,
    /// Evaluate grid rows on the Rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Rayon worker count (0 = auto-detect)
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub court: CourtLayout,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for HeatmapSettings {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
            smoothing_radius: DEFAULT_SMOOTHING_RADIUS,
            grid_size: None,
            grid_width: None,
            grid_height: None,
            smoothing_epsilon: SMOOTHING_EPSILON,
            grid_epsilon: GRID_EPSILON,
            parallel: true,
            threads: 0,
            court: CourtLayout::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (e.g. "info", "shotmap=debug"); RUST_LOG wins if set
    pub level: String,
    /// Emit structured JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl HeatmapSettings {
    pub fn from_toml_str(content: &str) -> HeatmapResult<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a TOML file
    pub fn from_file(path: &Path) -> HeatmapResult<Self> {
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        info!("Loaded heatmap settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> HeatmapResult<Self> {
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Grid resolution. Without an explicit size the grid is a
    /// `court.width` square, so every mapped court pixel has a node.
    pub fn grid_dims(&self) -> GridDims {
        let size = self
            .grid_size
            .unwrap_or_else(|| court_grid_size(self.court.width));
        GridDims {
            width: self.grid_width.unwrap_or(size),
            height: self.grid_height.unwrap_or(size),
        }
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        check_power(self.power)?;
        let dims = self.grid_dims();
        if dims.width == 0 || dims.height == 0 {
            return Err(HeatmapError::InvalidGridSize {
                width: dims.width,
                height: dims.height,
            });
        }
        if self.smoothing_radius.is_nan() {
            return Err(HeatmapError::config("smoothing_radius must be a number"));
        }
        if !is_non_negative(self.smoothing_epsilon) || !is_non_negative(self.grid_epsilon) {
            return Err(HeatmapError::config(
                "smoothing_epsilon and grid_epsilon must be >= 0",
            ));
        }
        let court = &self.court;
        if !court.width.is_finite()
            || !court.height.is_finite()
            || !is_non_negative(court.padding)
            || court.width <= court.padding
            || court.height <= court.padding
        {
            return Err(HeatmapError::config(format!(
                "court {}x{} must be larger than its padding {}",
                court.width, court.height, court.padding
            )));
        }
        if !is_non_negative(court.made_value) || !is_non_negative(court.missed_value) {
            return Err(HeatmapError::config("made/missed values must be >= 0"));
        }
        Ok(())
    }
}

fn court_grid_size(width: f64) -> usize {
    if width.is_finite() && width > 0.0 {
        width.round() as usize
    } else {
        0
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
