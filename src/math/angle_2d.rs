//! Heading and normal primitives.
//!
//! Headings are angles in radians measured counter-clockwise from the
//! positive x-axis. Stored headings are kept in `(-π, π]`.
use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2, TOLERANCE};

/// Returns the heading of the direction from `a` to `b`.
///
/// Returns `None` when `a == b`, where the direction is undefined.
#[must_use]
pub fn heading_between(a: &Point2, b: &Point2) -> Option<f64> {
    if a == b {
        return None;
    }
    Some((b.y - a.y).atan2(b.x - a.x))
}

/// Wraps an angle into `(-π, π]`.
#[must_use]
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Signed smallest rotation taking heading `from` onto heading `to`, in `(-π, π]`.
#[must_use]
pub fn heading_difference(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

/// Unit direction vector for a heading.
#[must_use]
pub fn direction(heading: f64) -> Vector2 {
    Vector2::new(heading.cos(), heading.sin())
}

/// Rotates a vector by +90° (counter-clockwise).
#[must_use]
pub fn left_perpendicular(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Left unit normal of a tangent vector.
///
/// The tangent is rotated by +90° and normalized. A tangent shorter than
/// [`TOLERANCE`] has no direction; `fallback` is returned unchanged instead.
#[must_use]
pub fn unit_normal(tangent: &Vector2, fallback: Vector2) -> Vector2 {
    let normal = left_perpendicular(tangent);
    let len = normal.norm();
    if len < TOLERANCE {
        return fallback;
    }
    normal / len
}

/// Converts a polar coordinate (angle in degrees, radius) to a Cartesian point.
///
/// The angle is reduced modulo 360 before conversion.
#[must_use]
pub fn polar_to_cartesian(angle_deg: f64, radius: f64) -> Point2 {
    let angle = angle_deg.rem_euclid(360.0).to_radians();
    Point2::new(radius * angle.cos(), radius * angle.sin())
}
