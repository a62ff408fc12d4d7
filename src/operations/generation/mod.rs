mod anchor_fit;
mod arc_walk;
mod heading_walk;

pub use anchor_fit::{
    AnchorCurveFit, AnchorFitParams, MIN_ANCHORS, MIN_FIT_SAMPLES, MIN_SPACING_SQ,
    SAMPLES_PER_ANCHOR,
};
pub use arc_walk::{enforce_min_arc_angle, walk_segments, ArcWalk, ArcWalkParams, MIN_ARC_ANGLE_DEG};
pub use heading_walk::{
    HeadingWalk, HeadingWalkParams, ARC_TURN_THRESHOLD_DEG, STRAIGHT_TURN_THRESHOLD_DEG,
};

use crate::error::{OperationError, Result};
use crate::math::polyline_2d::dedup_consecutive;
use crate::math::Point2;

/// Removes consecutive duplicate anchors (and, for closed tracks, a trailing
/// copy of the first anchor), then checks that enough anchors remain.
fn prepare_anchors(anchors: &[Point2], closed: bool) -> Result<Vec<Point2>> {
    let mut points = dedup_consecutive(anchors);
    if closed && points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < MIN_ANCHORS {
        return Err(OperationError::InvalidInput(format!(
            "at least {MIN_ANCHORS} distinct anchors are required, got {}",
            points.len()
        ))
        .into());
    }
    Ok(points)
}
