//! Error types for heatmap construction and configuration.

use thiserror::Error;

/// Top-level error type for shotmap operations.
///
/// Degenerate input (no points, all-zero values, zero radius) is never an
/// error; only configurations the weighting formula cannot handle are.
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("Invalid power {power}: distance-decay exponent must be finite and > 0")]
    InvalidPower { power: f64 },

    #[error("Invalid grid size {width}x{height}: both dimensions must be > 0")]
    InvalidGridSize { width: usize, height: usize },

    #[error("Invalid point ({x}, {y}) with value {value}: {reason}")]
    InvalidPoint {
        x: f64,
        y: f64,
        value: f64,
        reason: &'static str,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

impl HeatmapError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

/// Reject exponents the IDW weight formula is undefined for.
pub(crate) fn check_power(power: f64) -> HeatmapResult<()> {
    if power.is_finite() && power > 0.0 {
        Ok(())
    } else {
        Err(HeatmapError::InvalidPower { power })
    }
}
