mod track_closer;

pub use track_closer::{
    ClosingStrategy, CloserParams, TrackCloser, ARC_CLOSING_STEP_DEG, ARC_CLOSING_THRESHOLD_DEG,
    SPLINE_CLOSING_FRACTION,
};
