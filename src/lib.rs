pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;

pub use config::{RunMode, TrackConfig};
pub use error::{Result, TrackError};
pub use geometry::{AnchorSet, BorderPair, Track};
pub use operations::{GenerationMode, TrackBuilder};
