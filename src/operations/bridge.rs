//! Pose-to-pose connectors shared by the generators and the track closer.

use crate::error::Result;
use crate::geometry::{CircularArc, Pose2};
use crate::math::angle_2d::{direction, heading_between};
use crate::math::{Point2, TOLERANCE};

/// Points along the straight line from `start` to `end`, excluding `start`.
///
/// The line is split into pieces no longer than `max_piece`; the last point
/// is `end` by exact value.
pub(crate) fn straight_samples(start: &Point2, end: &Point2, max_piece: f64) -> Vec<Point2> {
    let length = (end - start).norm();
    if length == 0.0 {
        return Vec::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pieces = ((length / max_piece).ceil().max(1.0)) as usize;
    #[allow(clippy::cast_precision_loss)]
    let denom = pieces as f64;
    let mut out: Vec<Point2> = (1..pieces)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let s = k as f64 / denom;
            start + (end - start) * s
        })
        .collect();
    out.push(*end);
    out
}

/// Arc from `start` tangent to `heading` ending on `end`, or a straight line
/// when `end` lies dead ahead.
///
/// Returns the samples (excluding `start`, ending on `end` exactly) and the
/// heading of travel at `end`. `arc_pieces` picks the sample count of an arc.
pub(crate) fn arc_or_line<F>(
    start: &Point2,
    heading: f64,
    end: &Point2,
    max_piece: f64,
    arc_pieces: &F,
) -> Result<(Vec<Point2>, f64)>
where
    F: Fn(&CircularArc) -> usize,
{
    if start == end {
        return Ok((Vec::new(), heading));
    }
    match CircularArc::through(start, heading, end)? {
        Some(arc) => {
            let mut samples = arc.sample_excluding_start(arc_pieces(&arc));
            if let Some(last) = samples.last_mut() {
                *last = *end;
            }
            Ok((samples, arc.exit_heading()))
        }
        None => Ok((
            straight_samples(start, end, max_piece),
            heading_between(start, end).unwrap_or(heading),
        )),
    }
}

/// Two tangent-continuous arcs from `from` to `to` matching both positions
/// and both headings.
///
/// Uses the equal-tangent-length biarc: the joint is the midpoint of
/// `from + d·t1` and `to − d·t2`. Returns the samples (excluding the start,
/// ending on `to.position` exactly) and the exit heading. Parallel headings
/// with the target behind have no such biarc; a straight line is used.
pub(crate) fn biarc<F>(
    from: &Pose2,
    to: &Pose2,
    max_piece: f64,
    arc_pieces: F,
) -> Result<(Vec<Point2>, f64)>
where
    F: Fn(&CircularArc) -> usize,
{
    let v = to.position - from.position;
    if v.norm() < TOLERANCE {
        return Ok((Vec::new(), from.heading));
    }
    let t1 = direction(from.heading);
    let t2 = direction(to.heading);
    let t = t1 + t2;
    let denom = 2.0 * (1.0 - t1.dot(&t2));
    let vt = v.dot(&t);

    let d = if denom.abs() > 1e-12 {
        (-vt + (vt * vt + denom * v.norm_squared()).sqrt()) / denom
    } else if v.dot(&t2) > TOLERANCE {
        v.norm_squared() / (4.0 * v.dot(&t2))
    } else {
        tracing::debug!("biarc undefined for parallel headings facing away, bridging straight");
        let samples = straight_samples(&from.position, &to.position, max_piece);
        return Ok((samples, to.heading));
    };

    let q1 = from.position + t1 * d;
    let q2 = to.position - t2 * d;
    let joint = q1 + (q2 - q1) * 0.5;

    let (mut samples, joint_heading) =
        arc_or_line(&from.position, from.heading, &joint, max_piece, &arc_pieces)?;
    let (second, exit_heading) =
        arc_or_line(&joint, joint_heading, &to.position, max_piece, &arc_pieces)?;
    samples.extend(second);
    Ok((samples, exit_heading))
}
