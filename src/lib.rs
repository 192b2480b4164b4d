//! Shotmap - shot-location heatmaps for basketball box scores
//!
//! Turns a sparse set of made/missed shot attempts into a smooth intensity
//! grid in two stages:
//!
//! 1. [`PointSmoother`] replaces every shot's value with an inverse distance
//!    weighted average of its neighbors within the smoothing radius.
//! 2. [`GridInterpolator`] resamples the smoothed points onto an integer grid
//!    with bounded-radius IDW and emits only the non-zero cells.
//!
//! [`HeatmapPipeline`] wires both stages to the court mapping and settings.

// Core modules
pub mod constants;
pub mod error;
pub mod logging;
pub mod parallel;
pub mod settings;

// Heatmap modules
pub mod court;
pub mod interpolation;
pub mod pipeline;
pub mod points;
pub mod smoothing;

// Re-export commonly used types for convenience
pub use constants::*;
pub use court::{CourtLayout, CourtShot, MatchShots, select_shots};
pub use error::{HeatmapError, HeatmapResult};
pub use interpolation::{GridDims, GridInterpolator, interpolate};
pub use logging::init_logging;
pub use parallel::init_parallel;
pub use pipeline::{HeatmapData, HeatmapPipeline};
pub use points::{GridCell, ShotPoint, SmoothedPoint};
pub use settings::{HeatmapSettings, LoggingConfig};
pub use smoothing::{PointSmoother, smooth};
