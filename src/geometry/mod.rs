pub mod anchor;
pub mod curve;
pub mod pose;
pub mod segment;
pub mod track;

pub use anchor::AnchorSet;
pub use curve::{CircularArc, CubicSpline2, Curve2, CurveDomain, SplineBoundary};
pub use pose::Pose2;
pub use segment::{Segment, SegmentKind};
pub use track::{BorderPair, Track};
