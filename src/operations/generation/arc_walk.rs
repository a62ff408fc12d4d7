use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::TrackConfig;
use crate::error::{OperationError, Result};
use crate::geometry::{CircularArc, Pose2, Segment, SegmentKind};
use crate::math::Point2;

/// Smallest arc sweep magnitude (degrees) the walker emits.
pub const MIN_ARC_ANGLE_DEG: f64 = 1.0;

/// Replaces arc angles below [`MIN_ARC_ANGLE_DEG`] in magnitude by
/// `±MIN_ARC_ANGLE_DEG`, keeping the sign. Zero becomes the positive minimum.
#[must_use]
pub fn enforce_min_arc_angle(angle_deg: f64) -> f64 {
    if angle_deg.abs() >= MIN_ARC_ANGLE_DEG {
        angle_deg
    } else if angle_deg < 0.0 {
        -MIN_ARC_ANGLE_DEG
    } else {
        MIN_ARC_ANGLE_DEG
    }
}

/// Parameters of the random arc walk.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcWalkParams {
    pub num_segments: usize,
    /// Kinds to draw from; repeated entries act as weights.
    pub segment_kinds: Vec<SegmentKind>,
    pub segment_length: f64,
    /// Largest straight-turn angle in degrees.
    pub turn_angle_max: f64,
    pub arc_radius_min: f64,
    pub arc_radius_max: f64,
    /// Largest arc sweep magnitude in degrees.
    pub arc_angle_max: f64,
    pub arc_num_points: usize,
}

impl From<&TrackConfig> for ArcWalkParams {
    fn from(config: &TrackConfig) -> Self {
        Self {
            num_segments: config.num_segments_random,
            segment_kinds: config.curve_types_random.clone(),
            segment_length: config.segment_length,
            turn_angle_max: config.turn_angle_max,
            arc_radius_min: config.arc_radius_min,
            arc_radius_max: config.arc_radius_max,
            arc_angle_max: config.arc_angle_max,
            arc_num_points: config.arc_num_points,
        }
    }
}

impl ArcWalkParams {
    fn validate(&self) -> Result<()> {
        let positive = |v: f64| v > 0.0;
        let non_negative = |v: f64| v >= 0.0;
        let ordered = |lo: f64, hi: f64| lo <= hi;

        let reason = if self.num_segments == 0 {
            "segment count must be positive"
        } else if self.segment_kinds.is_empty() {
            "at least one segment kind is required"
        } else if self.arc_num_points == 0 {
            "arcs need at least one sample"
        } else if !positive(self.arc_radius_min) || !ordered(self.arc_radius_min, self.arc_radius_max) {
            "arc radius bounds must be positive and ordered"
        } else if !positive(self.segment_length) {
            "segment length must be positive"
        } else if !non_negative(self.turn_angle_max) || !non_negative(self.arc_angle_max) {
            "angle limits must not be negative"
        } else {
            return Ok(());
        };
        Err(OperationError::InvalidInput(reason.to_owned()).into())
    }
}

/// Random walk of straight-turn and arc segments from the origin.
///
/// The walker starts at `(0, 0)` facing `+x`. Every segment starts with the
/// heading the previous one ended on, so the tangent is continuous across
/// arc boundaries; straight-turn segments rotate in place before advancing.
#[derive(Debug)]
pub struct ArcWalk {
    params: ArcWalkParams,
}

impl ArcWalk {
    #[must_use]
    pub fn new(params: ArcWalkParams) -> Self {
        Self { params }
    }

    /// Draws the configured number of segments and walks them.
    ///
    /// The result starts with the origin and is open; closing is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a zero segment count, an
    /// empty segment kind list, zero arc samples or inverted radius bounds.
    pub fn execute<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Point2>> {
        self.params.validate()?;

        let segments = (0..self.params.num_segments)
            .map(|_| self.draw_segment(rng))
            .collect::<Result<Vec<_>>>()?;
        let (points, end) = walk_segments(Pose2::origin(), &segments)?;

        tracing::debug!(
            segments = segments.len(),
            arcs = segments.iter().filter(|s| s.kind() == SegmentKind::Arc).count(),
            points = points.len(),
            end_heading = end.heading,
            "arc walk finished"
        );
        Ok(points)
    }

    fn draw_segment<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Segment> {
        let p = &self.params;
        let kind = p.segment_kinds.choose(rng).copied().ok_or_else(|| {
            OperationError::InvalidInput("at least one segment kind is required".to_owned())
        })?;
        Ok(match kind {
            SegmentKind::StraightTurn => Segment::StraightTurn {
                turn_angle: rng.random_range(-p.turn_angle_max..=p.turn_angle_max),
                length: p.segment_length,
            },
            SegmentKind::Arc => Segment::Arc {
                radius: rng.random_range(p.arc_radius_min..=p.arc_radius_max),
                total_angle: rng.random_range(-p.arc_angle_max..=p.arc_angle_max),
                num_samples: p.arc_num_points,
            },
        })
    }
}

/// Applies `segments` in order from `start`.
///
/// Returns every emitted point (starting with `start.position`) together
/// with the final pose. Arc angles pass through [`enforce_min_arc_angle`].
///
/// # Errors
///
/// Returns an error if an arc segment has a non-positive radius.
pub fn walk_segments(start: Pose2, segments: &[Segment]) -> Result<(Vec<Point2>, Pose2)> {
    let mut pose = start;
    let mut points = vec![start.position];

    for segment in segments {
        match *segment {
            Segment::StraightTurn { turn_angle, length } => {
                pose = pose.turned(turn_angle.to_radians()).advanced(length);
                points.push(pose.position);
            }
            Segment::Arc {
                radius,
                total_angle,
                num_samples,
            } => {
                let sweep = enforce_min_arc_angle(total_angle).to_radians();
                let arc = CircularArc::from_pose(&pose.position, pose.heading, radius, sweep)?;
                let samples = arc.sample_excluding_start(num_samples);
                let end = samples.last().copied().unwrap_or(pose.position);
                points.extend(samples);
                pose = Pose2::new(end, arc.exit_heading());
            }
        }
    }

    Ok((points, pose))
}
