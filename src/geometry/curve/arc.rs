use crate::error::{GeometryError, Result};
use crate::math::angle_2d::{heading_between, heading_difference, wrap_angle};
use crate::math::arc_2d::{
    arc_heading_at_angle, arc_point_at, arc_tangent_at, center_from_pose, radius_from_chord,
};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve2, CurveDomain};

/// A circular arc in the plane.
///
/// Parameterized over `[0, 1]`: the polar angle around `center` moves
/// linearly from `start_angle` to `start_angle + sweep`. A positive sweep
/// turns left (counter-clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct CircularArc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl CircularArc {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the sweep is zero.
    pub fn new(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Creates the arc that leaves `position` tangentially to `heading`.
    ///
    /// The center sits `radius` away, perpendicular to the heading: on the
    /// left for a positive sweep, on the right for a negative one.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive or the sweep is zero.
    pub fn from_pose(position: &Point2, heading: f64, radius: f64, sweep: f64) -> Result<Self> {
        let center = center_from_pose(position, heading, radius, sweep);
        // Angle of `position` seen from the center: opposite of the center offset.
        let quarter = if sweep >= 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            -std::f64::consts::FRAC_PI_2
        };
        Self::new(center, radius, wrap_angle(heading - quarter), sweep)
    }

    /// Creates the arc that leaves `start` tangentially to `heading` and ends at `end`.
    ///
    /// The sweep is twice the angle between the heading and the chord, which
    /// makes the arc land on `end` exactly. Returns `Ok(None)` when `end` lies
    /// straight ahead (no arc is needed).
    ///
    /// # Errors
    ///
    /// Returns an error if `start == end`.
    pub fn through(start: &Point2, heading: f64, end: &Point2) -> Result<Option<Self>> {
        let chord_heading = heading_between(start, end).ok_or(GeometryError::ZeroVector)?;
        let turn = heading_difference(heading, chord_heading);
        let sweep = 2.0 * turn;
        if sweep.abs() < 1e-9 {
            return Ok(None);
        }
        match radius_from_chord((end - start).norm(), sweep) {
            Some(radius) => Self::from_pose(start, heading, radius, sweep).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the center of the arc circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the signed sweep angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns the polar angle of the start point around the center.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    /// First point of the arc.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, 0.0)
    }

    /// Last point of the arc.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, 1.0)
    }

    /// Heading of travel at the end of the arc, in `(-π, π]`.
    #[must_use]
    pub fn exit_heading(&self) -> f64 {
        arc_heading_at_angle(self.start_angle + self.sweep, self.sweep)
    }

    /// Samples `count` points at `t = k / count` for `k = 1..=count`.
    ///
    /// The start point is excluded so consecutive pieces can be appended
    /// without duplicating the joint.
    #[must_use]
    pub fn sample_excluding_start(&self, count: usize) -> Vec<Point2> {
        let count = count.max(1);
        #[allow(clippy::cast_precision_loss)]
        let denom = count as f64;
        (1..=count)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let t = k as f64 / denom;
                arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, t)
            })
            .collect()
    }

    fn check_parameter(t: f64) -> Result<()> {
        if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&t) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        Ok(())
    }
}

impl Curve2 for CircularArc {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        Self::check_parameter(t)?;
        Ok(arc_point_at(
            &self.center,
            self.radius,
            self.start_angle,
            self.sweep,
            t,
        ))
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        Self::check_parameter(t)?;
        Ok(arc_tangent_at(self.start_angle, self.sweep, t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        (self.sweep.abs() - std::f64::consts::TAU).abs() < TOLERANCE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn left_quarter_turn_from_origin() {
        let arc = CircularArc::from_pose(&Point2::origin(), 0.0, 10.0, FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(arc.center().x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.center().y, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.radius(), 10.0);
        assert_abs_diff_eq!(arc.start_angle(), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(arc.sweep(), FRAC_PI_2);

        let start = arc.start_point();
        assert_abs_diff_eq!(start.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(start.y, 0.0, epsilon = 1e-12);

        let end = arc.end_point();
        assert_abs_diff_eq!(end.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end.y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.exit_heading(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn right_turn_exit_heading() {
        let arc = CircularArc::from_pose(&Point2::new(1.0, 2.0), 0.3, 4.0, -0.8).unwrap();
        assert_abs_diff_eq!(arc.exit_heading(), 0.3 - 0.8, epsilon = 1e-12);
        let t = arc.tangent(0.0).unwrap();
        assert_abs_diff_eq!(t.y.atan2(t.x), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn through_lands_on_target() {
        let start = Point2::new(0.0, 0.0);
        let end = Point2::new(5.0, 3.0);
        let arc = CircularArc::through(&start, 0.0, &end).unwrap().unwrap();
        let p = arc.end_point();
        assert_abs_diff_eq!(p.x, end.x, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, end.y, epsilon = 1e-9);
        // Exit heading mirrors the entry heading across the chord.
        let chord = 3.0f64.atan2(5.0);
        assert_abs_diff_eq!(arc.exit_heading(), 2.0 * chord, epsilon = 1e-9);
    }

    #[test]
    fn through_straight_ahead_needs_no_arc() {
        let arc = CircularArc::through(&Point2::origin(), 0.0, &Point2::new(3.0, 0.0)).unwrap();
        assert!(arc.is_none());
    }

    #[test]
    fn through_coincident_points_fails() {
        let p = Point2::new(1.0, 1.0);
        assert!(CircularArc::through(&p, 0.0, &p).is_err());
    }

    #[test]
    fn samples_exclude_start_and_end_on_arc() {
        let arc = CircularArc::from_pose(&Point2::origin(), 0.0, 2.0, PI).unwrap();
        let pts = arc.sample_excluding_start(4);
        assert_eq!(pts.len(), 4);
        for p in &pts {
            assert_abs_diff_eq!((p - arc.center()).norm(), 2.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(pts[3].y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn evaluate_rejects_out_of_range() {
        let arc = CircularArc::from_pose(&Point2::origin(), 0.0, 2.0, 1.0).unwrap();
        assert!(arc.evaluate(1.5).is_err());
        assert!(!arc.is_closed());
    }

    #[test]
    fn zero_radius_is_degenerate() {
        assert!(CircularArc::new(Point2::origin(), 0.0, 0.0, 1.0).is_err());
    }
}
