//! Point smoothing (stage one of the heatmap)
//!
//! Replaces each shot's value with an inverse-distance weighted average of
//! every informative shot within the smoothing radius, itself included.
//! This takes the edge off isolated makes/misses before gridding.
//!
//! Cost is O(N²) in the number of non-zero shots, which stays in the
//! hundreds for any realistic game selection.

use tracing::debug;

use crate::constants::SMOOTHING_EPSILON;
use crate::error::{HeatmapResult, check_power};
use crate::points::{ShotPoint, SmoothedPoint, clamp_value, distance};

/// Stage-one IDW smoother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSmoother {
    power: f64,
    radius: f64,
    epsilon: f64,
}

impl PointSmoother {
    /// Create a smoother. Negative or NaN radii collapse to 0, which leaves
    /// every point with (at most) its coincident neighbors.
    pub fn new(power: f64, radius: f64) -> HeatmapResult<Self> {
        check_power(power)?;
        Ok(Self {
            power,
            radius: sanitize_radius(radius),
            epsilon: SMOOTHING_EPSILON,
        })
    }

    /// Override the distance under which two shots count as the same spot.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Smooth `points`, returning one output per non-zero input in input order.
    pub fn smooth(&self, points: &[ShotPoint]) -> Vec<SmoothedPoint> {
        let valid: Vec<&ShotPoint> = points.iter().filter(|p| p.is_informative()).collect();
        if valid.is_empty() {
            debug!("Smoothing: no informative points in {} inputs", points.len());
            return Vec::new();
        }

        let smoothed: Vec<SmoothedPoint> = valid
            .iter()
            .map(|target| SmoothedPoint {
                x: target.x,
                y: target.y,
                value: self.smooth_one(target, &valid),
            })
            .collect();

        debug!(
            "Smoothing: {} inputs -> {} points (power={}, radius={})",
            points.len(),
            smoothed.len(),
            self.power,
            self.radius
        );
        smoothed
    }

    fn smooth_one(&self, target: &ShotPoint, neighbors: &[&ShotPoint]) -> f64 {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for neighbor in neighbors {
            let d = distance(neighbor.x, neighbor.y, target.x, target.y);
            if d > self.radius {
                continue;
            }
            // Anything inside epsilon is treated as the target's own spot
            let weight = if d < self.epsilon {
                1.0
            } else {
                1.0 / d.powf(self.power)
            };
            weighted_sum += neighbor.value * weight;
            total_weight += weight;
        }

        let value = if total_weight == 0.0 {
            target.value
        } else {
            weighted_sum / total_weight
        };
        clamp_value(value)
    }
}

/// Smooth with the default exact-match threshold.
pub fn smooth(points: &[ShotPoint], power: f64, radius: f64) -> HeatmapResult<Vec<SmoothedPoint>> {
    Ok(PointSmoother::new(power, radius)?.smooth(points))
}

pub(crate) fn sanitize_radius(radius: f64) -> f64 {
    if radius.is_nan() || radius < 0.0 {
        0.0
    } else {
        radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeatmapError;

    fn pt(x: f64, y: f64, value: f64) -> ShotPoint {
        ShotPoint { x, y, value }
    }

    #[test]
    fn test_empty_and_all_zero_inputs() {
        assert!(smooth(&[], 0.5, 10.0).unwrap().is_empty());
        let zeros = [pt(1.0, 1.0, 0.0), pt(2.0, 2.0, 0.0)];
        assert!(smooth(&zeros, 0.5, 10.0).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_positive_power() {
        let points = [pt(1.0, 1.0, 50.0)];
        assert!(matches!(
            smooth(&points, 0.0, 10.0),
            Err(HeatmapError::InvalidPower { .. })
        ));
        assert!(smooth(&points, -2.0, 10.0).is_err());
    }

    #[test]
    fn test_single_point_keeps_value() {
        let out = smooth(&[pt(50.0, 50.0, 100.0)], 0.5, 10.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, 100.0);
        assert_eq!((out[0].x, out[0].y), (50.0, 50.0));
    }

    #[test]
    fn test_zero_value_points_are_dropped_not_weighted() {
        let with_zero = [pt(10.0, 10.0, 100.0), pt(12.0, 10.0, 0.0)];
        let out = smooth(&with_zero, 0.5, 10.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value, 100.0);
    }

    #[test]
    fn test_two_neighbors_blend() {
        // d = 4, weight = 1/4^0.5 = 0.5 for the neighbor, 1.0 for self
        let points = [pt(0.0, 0.0, 100.0), pt(4.0, 0.0, 10.0)];
        let out = smooth(&points, 0.5, 10.0).unwrap();
        let expected_first = (100.0 * 1.0 + 10.0 * 0.5) / 1.5;
        let expected_second = (10.0 * 1.0 + 100.0 * 0.5) / 1.5;
        assert!(
            (out[0].value - expected_first).abs() < 1e-9,
            "expected {}, got {}",
            expected_first,
            out[0].value
        );
        assert!((out[1].value - expected_second).abs() < 1e-9);
    }

    #[test]
    fn test_points_within_epsilon_weigh_as_self() {
        // 0.5 apart is under the 1.0 epsilon, so both weights are 1.0
        let points = [pt(0.0, 0.0, 100.0), pt(0.5, 0.0, 10.0)];
        let out = smooth(&points, 0.5, 10.0).unwrap();
        assert!((out[0].value - 55.0).abs() < 1e-9);
        assert!((out[1].value - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_radius_excludes_far_points() {
        let alone = smooth(&[pt(0.0, 0.0, 80.0)], 0.5, 10.0).unwrap();
        let with_far = smooth(&[pt(0.0, 0.0, 80.0), pt(11.0, 0.0, 10.0)], 0.5, 10.0).unwrap();
        assert_eq!(alone[0].value, with_far[0].value);
        assert_eq!(with_far[1].value, 10.0);
    }

    #[test]
    fn test_zero_and_negative_radius_isolate_points() {
        let points = [pt(0.0, 0.0, 80.0), pt(3.0, 0.0, 10.0)];
        for radius in [0.0, -5.0, f64::NAN] {
            let out = smooth(&points, 0.5, radius).unwrap();
            assert_eq!(out[0].value, 80.0, "radius {}", radius);
            assert_eq!(out[1].value, 10.0, "radius {}", radius);
        }
    }

    #[test]
    fn test_custom_epsilon() {
        let points = [pt(0.0, 0.0, 100.0), pt(0.5, 0.0, 10.0)];
        let smoother = PointSmoother::new(1.0, 10.0).unwrap().with_epsilon(0.1);
        let out = smoother.smooth(&points);
        // d = 0.5 now uses the IDW weight 1/0.5 = 2.0
        let expected = (100.0 + 10.0 * 2.0) / 3.0;
        assert!((out[0].value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_output_is_clamped() {
        // Out-of-scale inputs still land on the renderer scale
        let out = smooth(&[pt(0.0, 0.0, 250.0)], 0.5, 10.0).unwrap();
        assert_eq!(out[0].value, 100.0);
    }
}
