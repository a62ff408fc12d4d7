use crate::math::angle_2d::{direction, wrap_angle};
use crate::math::Point2;

/// Position plus heading of a walker tracing out a centerline.
///
/// The heading is always stored wrapped into `(-π, π]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2 {
    pub position: Point2,
    pub heading: f64,
}

impl Pose2 {
    /// Creates a pose, wrapping the heading.
    #[must_use]
    pub fn new(position: Point2, heading: f64) -> Self {
        Self {
            position,
            heading: wrap_angle(heading),
        }
    }

    /// The initial walker pose: origin, facing +x.
    #[must_use]
    pub fn origin() -> Self {
        Self::new(Point2::origin(), 0.0)
    }

    /// Returns this pose rotated in place by `delta` radians.
    #[must_use]
    pub fn turned(&self, delta: f64) -> Self {
        Self::new(self.position, self.heading + delta)
    }

    /// Returns this pose moved `distance` along its heading.
    #[must_use]
    pub fn advanced(&self, distance: f64) -> Self {
        Self {
            position: self.position + direction(self.heading) * distance,
            heading: self.heading,
        }
    }
}

impl Default for Pose2 {
    fn default() -> Self {
        Self::origin()
    }
}
