use std::f64::consts::PI;

use rand::Rng;

use crate::config::TrackConfig;
use crate::error::{OperationError, Result};
use crate::math::angle_2d::polar_to_cartesian;
use crate::math::Point2;

/// Fraction of the angular step used as jitter for random polar anchors.
const ANGLE_JITTER: f64 = 0.15;

/// Fraction of the half distance range used as the radial oscillation amplitude.
const DISTANCE_AMPLITUDE: f64 = 0.8;

/// Fraction of the amplitude used as radial jitter.
const DISTANCE_JITTER: f64 = 0.1;

/// Ordered sparse waypoints a fitted or walked curve passes through.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorSet {
    points: Vec<Point2>,
}

impl AnchorSet {
    /// Creates an anchor set from Cartesian points.
    #[must_use]
    pub fn from_points(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Creates an anchor set from polar pairs (angle in degrees, distance to origin).
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if either list is empty or the
    /// lengths differ.
    pub fn from_polar(angles_deg: &[f64], distances: &[f64]) -> Result<Self> {
        if angles_deg.is_empty() || angles_deg.len() != distances.len() {
            return Err(OperationError::InvalidInput(format!(
                "polar anchors need equally many angles and distances, got {} and {}",
                angles_deg.len(),
                distances.len()
            ))
            .into());
        }
        let points = angles_deg
            .iter()
            .zip(distances)
            .map(|(&angle, &distance)| polar_to_cartesian(angle, distance))
            .collect();
        Ok(Self { points })
    }

    /// The fixed polar anchors of a configuration.
    ///
    /// # Errors
    ///
    /// See [`AnchorSet::from_polar`].
    pub fn from_config(config: &TrackConfig) -> Result<Self> {
        Self::from_polar(&config.polar_angles_fixed, &config.polar_distances_fixed)
    }

    /// Generates `count` random polar anchors.
    ///
    /// Angles are spread evenly over `angle_range` with a jitter of ±15% of
    /// the step, then sorted. Distances oscillate around the middle of
    /// `distance_range` as `mid + 0.8·half·sin(3πi/n)` with ±10% amplitude
    /// jitter, clamped into the range.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `count` is zero or a range is
    /// reversed.
    pub fn random_polar<R: Rng + ?Sized>(
        count: usize,
        angle_range: [f64; 2],
        distance_range: [f64; 2],
        rng: &mut R,
    ) -> Result<Self> {
        let [angle_min, angle_max] = angle_range;
        let [dist_min, dist_max] = distance_range;
        if count == 0 || angle_max < angle_min || dist_max < dist_min {
            return Err(OperationError::InvalidInput(
                "random polar anchors need a positive count and ordered ranges".to_owned(),
            )
            .into());
        }

        #[allow(clippy::cast_precision_loss)]
        let n = count as f64;
        let step = (angle_max - angle_min) / n;
        let jitter = ANGLE_JITTER * step;

        let mut angles: Vec<f64> = (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let base = angle_min + i as f64 * step;
                (base + uniform(rng, jitter)).rem_euclid(360.0)
            })
            .collect();
        angles.sort_by(f64::total_cmp);

        let mid = (dist_min + dist_max) * 0.5;
        let amplitude = (dist_max - dist_min) * 0.5 * DISTANCE_AMPLITUDE;
        let distances: Vec<f64> = (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let phase = i as f64 * 3.0 * PI / n;
                let d = mid + amplitude * phase.sin() + uniform(rng, DISTANCE_JITTER * amplitude);
                d.clamp(dist_min, dist_max)
            })
            .collect();

        Self::from_polar(&angles, &distances)
    }

    /// Random polar anchors sized by a configuration.
    ///
    /// # Errors
    ///
    /// See [`AnchorSet::random_polar`].
    pub fn random_from_config<R: Rng + ?Sized>(config: &TrackConfig, rng: &mut R) -> Result<Self> {
        Self::random_polar(
            config.num_points_polar_random,
            config.polar_angle_range_random,
            config.polar_distance_range_random,
            rng,
        )
    }

    /// The anchors as Cartesian points.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Consumes the set, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    /// Number of anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no anchors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Uniform sample from `[-half_width, half_width]`.
fn uniform<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    if half_width <= 0.0 {
        return 0.0;
    }
    rng.random_range(-half_width..=half_width)
}
