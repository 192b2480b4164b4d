//! Tunable constants for shotmap
//!
//! Default heatmap parameters live here so the settings file, the CLI and
//! the tests agree on one set of numbers.

// =============================================================================
// IDW DEFAULTS
// =============================================================================

pub const DEFAULT_POWER: f64 = 0.5; // Distance-decay exponent for both stages
pub const DEFAULT_SMOOTHING_RADIUS: f64 = 10.0; // Also used as the gridding search radius
pub const DEFAULT_GRID_SIZE: usize = 100; // Cells per axis

// =============================================================================
// EXACT-MATCH THRESHOLDS
// =============================================================================

/// Smoothing runs on raw integer pixel positions, so "same spot" is anything
/// closer than one pixel.
pub const SMOOTHING_EPSILON: f64 = 1.0;
/// Gridding only short-circuits on true coincidence with an integer node.
pub const GRID_EPSILON: f64 = 1e-6;

// =============================================================================
// VALUE SCALE
// =============================================================================

pub const VALUE_MIN: f64 = 0.0;
pub const VALUE_MAX: f64 = 100.0;
pub const MADE_VALUE: f64 = 100.0; // Made shot reads as full intensity
pub const MISSED_VALUE: f64 = 10.0; // Missed shot stays visible but cold

// =============================================================================
// COURT LAYOUT
// =============================================================================

pub const COURT_WIDTH: f64 = 400.0;
pub const COURT_HEIGHT: f64 = 400.0;
pub const COURT_PADDING: f64 = 60.0; // Total inset, split evenly between both edges

/// Default settings file consulted by the CLI
pub const DEFAULT_SETTINGS_FILE: &str = "config/shotmap.toml";
