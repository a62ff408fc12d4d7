use std::f64::consts::TAU;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::TrackConfig;
use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{AnchorSet, CircularArc, Pose2, SegmentKind};
use crate::math::angle_2d::{heading_between, heading_difference};
use crate::math::arc_2d::{center_from_pose, radius_from_chord};
use crate::math::polyline_2d::dedup_consecutive;
use crate::math::Point2;
use crate::operations::bridge::{arc_or_line, biarc, straight_samples};
use crate::operations::smoothing::CenterlineSmoothing;

use super::prepare_anchors;

/// Turns (degrees) smaller than this are always bridged with a straight line.
pub const STRAIGHT_TURN_THRESHOLD_DEG: f64 = 10.0;

/// Turns (degrees) larger than this are always bridged with an arc.
pub const ARC_TURN_THRESHOLD_DEG: f64 = 45.0;

/// Parameters of the heading-matched anchor walk.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingWalkParams {
    pub closed: bool,
    /// Kinds to choose from for turns between the two thresholds.
    pub segment_kinds: Vec<SegmentKind>,
    /// Longest straight piece.
    pub segment_length: f64,
    pub arc_radius_min: f64,
    pub arc_radius_max: f64,
    pub arc_num_points: usize,
    pub smoothing_window: usize,
}

impl From<&TrackConfig> for HeadingWalkParams {
    fn from(config: &TrackConfig) -> Self {
        Self {
            closed: config.closed,
            segment_kinds: config.curve_types_random.clone(),
            segment_length: config.segment_length,
            arc_radius_min: config.arc_radius_min,
            arc_radius_max: config.arc_radius_max,
            arc_num_points: config.arc_num_points,
            smoothing_window: config.smoothing_window,
        }
    }
}

impl HeadingWalkParams {
    fn validate(&self) -> Result<()> {
        let positive = |v: f64| v > 0.0;
        let ordered = |lo: f64, hi: f64| lo <= hi;

        let reason = if self.segment_kinds.is_empty() {
            "at least one segment kind is required"
        } else if self.arc_num_points == 0 {
            "arcs need at least one sample"
        } else if !positive(self.arc_radius_min) || !ordered(self.arc_radius_min, self.arc_radius_max) {
            "arc radius bounds must be positive and ordered"
        } else if !positive(self.segment_length) {
            "segment length must be positive"
        } else {
            return Ok(());
        };
        Err(OperationError::InvalidInput(reason.to_owned()).into())
    }
}

/// Walks from anchor to anchor, bridging each gap with a straight line or a
/// circular arc placed analytically from the current pose.
///
/// The walk starts on the first anchor facing the second. Arcs leave the
/// current pose tangentially, so the heading is continuous wherever an arc
/// is used. Closed walks end with a biarc that lands on the first anchor
/// with the initial heading.
#[derive(Debug)]
pub struct HeadingWalk {
    params: HeadingWalkParams,
}

impl HeadingWalk {
    #[must_use]
    pub fn new(params: HeadingWalkParams) -> Self {
        Self { params }
    }

    /// Walks through `anchors`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for fewer than three distinct
    /// anchors or malformed parameters.
    pub fn execute<R: Rng + ?Sized>(&self, anchors: &AnchorSet, rng: &mut R) -> Result<Vec<Point2>> {
        self.params.validate()?;
        let closed = self.params.closed;
        let anchors = prepare_anchors(anchors.points(), closed)?;

        let start = anchors[0];
        let initial_heading =
            heading_between(&start, &anchors[1]).ok_or(GeometryError::ZeroVector)?;
        let mut pose = Pose2::new(start, initial_heading);
        let mut points = vec![start];

        for target in &anchors[1..] {
            let kind = self.bridge_kind(&pose, target, rng)?;
            pose = self.bridge(pose, target, kind, &mut points)?;
        }

        if closed {
            let arc_points = self.params.arc_num_points;
            let (samples, _) = biarc(
                &pose,
                &Pose2::new(start, initial_heading),
                self.params.segment_length,
                |_: &CircularArc| arc_points,
            )?;
            points.extend(samples);
            if let Some(last) = points.last_mut() {
                *last = start;
            }
        }

        let smoothed = CenterlineSmoothing::new(self.params.smoothing_window, closed).execute(&points);
        let result = dedup_consecutive(&smoothed);
        tracing::debug!(anchors = anchors.len(), points = result.len(), closed, "heading walk finished");
        Ok(result)
    }

    /// Straight below [`STRAIGHT_TURN_THRESHOLD_DEG`], arc above
    /// [`ARC_TURN_THRESHOLD_DEG`], a weighted draw from the configured kinds
    /// in between.
    fn bridge_kind<R: Rng + ?Sized>(
        &self,
        pose: &Pose2,
        target: &Point2,
        rng: &mut R,
    ) -> Result<SegmentKind> {
        let Some(bearing) = heading_between(&pose.position, target) else {
            return Ok(SegmentKind::StraightTurn);
        };
        let turn = heading_difference(pose.heading, bearing).abs().to_degrees();
        if turn < STRAIGHT_TURN_THRESHOLD_DEG {
            Ok(SegmentKind::StraightTurn)
        } else if turn > ARC_TURN_THRESHOLD_DEG {
            Ok(SegmentKind::Arc)
        } else {
            self.params
                .segment_kinds
                .choose(rng)
                .copied()
                .ok_or_else(|| {
                    OperationError::InvalidInput("at least one segment kind is required".to_owned())
                        .into()
                })
        }
    }

    /// Appends the bridge from `pose` to `target` and returns the pose at its end.
    ///
    /// Arcs whose chord radius exceeds the maximum become a wide turn. Arcs
    /// below the minimum radius are kept exact: a minimum-radius arc tangent
    /// at the same pose encloses the target and would overshoot it.
    fn bridge(
        &self,
        pose: Pose2,
        target: &Point2,
        kind: SegmentKind,
        points: &mut Vec<Point2>,
    ) -> Result<Pose2> {
        let Some(bearing) = heading_between(&pose.position, target) else {
            return Ok(pose);
        };
        if kind == SegmentKind::StraightTurn {
            points.extend(straight_samples(&pose.position, target, self.params.segment_length));
            return Ok(Pose2::new(*target, bearing));
        }

        let p = &self.params;
        let turn = heading_difference(pose.heading, bearing);
        let distance = (target - pose.position).norm();
        let Some(radius) = radius_from_chord(distance, 2.0 * turn) else {
            tracing::debug!(turn, "no arc reaches the target, bridging straight");
            points.extend(straight_samples(&pose.position, target, p.segment_length));
            return Ok(Pose2::new(*target, bearing));
        };

        if radius > p.arc_radius_max {
            return self.wide_turn(pose, target, bearing, points);
        }
        if radius < p.arc_radius_min {
            tracing::debug!(
                radius,
                min = p.arc_radius_min,
                "anchor needs an arc below the minimum radius, keeping the exact arc"
            );
        }

        let arc_points = p.arc_num_points;
        let (samples, heading) = arc_or_line(
            &pose.position,
            pose.heading,
            target,
            p.segment_length,
            &|_: &CircularArc| arc_points,
        )?;
        points.extend(samples);
        Ok(Pose2::new(*target, heading))
    }

    /// Turns on an arc of the maximum radius until the target lies straight
    /// ahead, then runs straight onto it.
    fn wide_turn(
        &self,
        pose: Pose2,
        target: &Point2,
        bearing: f64,
        points: &mut Vec<Point2>,
    ) -> Result<Pose2> {
        let p = &self.params;
        let radius = p.arc_radius_max;
        let left = heading_difference(pose.heading, bearing) >= 0.0;
        let side = if left { 1.0 } else { -1.0 };
        let center = center_from_pose(&pose.position, pose.heading, radius, side);

        let to_target = target - center;
        let center_distance = to_target.norm();
        if center_distance <= radius {
            points.extend(straight_samples(&pose.position, target, p.segment_length));
            return Ok(Pose2::new(*target, bearing));
        }

        let beta = to_target.y.atan2(to_target.x);
        let alpha = (radius / center_distance).acos();
        let tangent_angle = if left { beta - alpha } else { beta + alpha };
        let start_angle = (pose.position.y - center.y).atan2(pose.position.x - center.x);
        let sweep = if left {
            (tangent_angle - start_angle).rem_euclid(TAU)
        } else {
            -(start_angle - tangent_angle).rem_euclid(TAU)
        };
        if sweep.abs() < 1e-9 || sweep.abs() > TAU - 1e-9 {
            points.extend(straight_samples(&pose.position, target, p.segment_length));
            return Ok(Pose2::new(*target, bearing));
        }

        let arc = CircularArc::from_pose(&pose.position, pose.heading, radius, sweep)?;
        let samples = arc.sample_excluding_start(p.arc_num_points);
        let arc_end = samples.last().copied().unwrap_or(pose.position);
        points.extend(samples);
        points.extend(straight_samples(&arc_end, target, p.segment_length));
        Ok(Pose2::new(*target, arc.exit_heading()))
    }
}
