use serde::{Deserialize, Serialize};

/// Kind of segment the random walker may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Turn in place, then move straight ahead by the segment length.
    StraightTurn,
    /// Follow a circular arc tangent to the current heading.
    Arc,
}

/// A concrete segment to be applied against the current pose.
///
/// Angles are in degrees, as they come from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Rotate the heading by `turn_angle` degrees, then advance `length`.
    StraightTurn { turn_angle: f64, length: f64 },
    /// Sweep `total_angle` degrees (positive = left) on a circle of `radius`,
    /// emitting `num_samples` points.
    Arc {
        radius: f64,
        total_angle: f64,
        num_samples: usize,
    },
}

impl Segment {
    /// The kind this segment belongs to.
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::StraightTurn { .. } => SegmentKind::StraightTurn,
            Self::Arc { .. } => SegmentKind::Arc,
        }
    }
}
