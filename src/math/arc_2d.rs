/// 2D circular-arc math utilities.
///
/// Arcs are described by a center, a radius, the polar angle of the start
/// point around the center (`start_angle`) and a signed `sweep`:
/// - `sweep > 0`: counter-clockwise (left turn)
/// - `sweep < 0`: clockwise (right turn)
use std::f64::consts::FRAC_PI_2;

use super::angle_2d::{direction, wrap_angle};
use super::{Point2, Vector2};

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    center + direction(angle) * radius
}

/// Computes the unit tangent direction on an arc at parameter `t` in `[0, 1]`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Tangent to circle at angle θ is (-sin θ, cos θ) for CCW; negate for CW.
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Heading of travel at polar angle `angle` on an arc turning with the sign of `sweep`.
#[must_use]
pub fn arc_heading_at_angle(angle: f64, sweep: f64) -> f64 {
    let quarter = if sweep >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    wrap_angle(angle + quarter)
}

/// Center of the circle tangent to `heading` at `position`.
///
/// The center lies on the left of the heading for a positive `sweep` and on
/// the right otherwise.
#[must_use]
pub fn center_from_pose(position: &Point2, heading: f64, radius: f64, sweep: f64) -> Point2 {
    let quarter = if sweep >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
    position + direction(heading + quarter) * radius
}

/// Radius of the circle whose arc of angle `sweep` spans a chord of length `chord`.
///
/// `r = chord / (2·sin(|sweep|/2))`. Returns `None` when the sine vanishes.
#[must_use]
pub fn radius_from_chord(chord: f64, sweep: f64) -> Option<f64> {
    let half_sin = (sweep.abs() * 0.5).sin();
    if half_sin < 1e-12 {
        return None;
    }
    Some(chord / (2.0 * half_sin))
}

/// Number of straight pieces needed to approximate an arc so that each piece
/// subtends at most `max_step` radians. Never returns fewer than `min_pieces`.
#[must_use]
pub fn arc_piece_count(sweep: f64, max_step: f64, min_pieces: usize) -> usize {
    let pieces = (sweep.abs() / max_step).floor();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pieces = pieces.max(0.0) as usize;
    pieces.max(min_pieces)
}
