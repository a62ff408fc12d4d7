mod bridge;
pub mod closing;
pub mod generation;
pub mod offset;
pub mod pipeline;
pub mod smoothing;

pub use closing::{ClosingStrategy, CloserParams, TrackCloser};
pub use generation::{
    AnchorCurveFit, AnchorFitParams, ArcWalk, ArcWalkParams, HeadingWalk, HeadingWalkParams,
};
pub use offset::BorderOffset;
pub use pipeline::{GenerationMode, TrackBuilder};
pub use smoothing::CenterlineSmoothing;
