use rand::Rng;

use crate::config::{RunMode, TrackConfig};
use crate::error::{ConfigError, OperationError, Result};
use crate::geometry::{AnchorSet, Track};
use crate::io;
use crate::math::polyline_2d::{dedup_consecutive, is_closed};
use crate::math::Point2;

use super::closing::{CloserParams, TrackCloser};
use super::generation::{AnchorCurveFit, AnchorFitParams, ArcWalk, ArcWalkParams, HeadingWalk, HeadingWalkParams};
use super::offset::BorderOffset;

/// Where a centerline comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMode {
    /// Random walk of straight-turn and arc segments.
    RandomArcWalk,
    /// A given centerline, closed on request.
    Points(Vec<Point2>),
    /// Global fit through the configured fixed polar anchors.
    FixedPolar,
    /// Global fit through random polar anchors.
    RandomPolar,
    /// Heading-matched walk through random polar anchors.
    RandomPolarWalk,
}

impl GenerationMode {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomArcWalk => "random_arc_walk",
            Self::Points(_) => "points",
            Self::FixedPolar => "fixed_polar",
            Self::RandomPolar => "random_polar",
            Self::RandomPolarWalk => "random_polar_walk",
        }
    }
}

/// Builds complete tracks from a configuration.
///
/// A generator produces the centerline; if the configuration asks for a
/// closed track and the generator left it open, [`TrackCloser`] bridges it.
/// [`BorderOffset`] then derives both borders.
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    config: TrackConfig,
}

impl TrackBuilder {
    #[must_use]
    pub fn new(config: TrackConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Produces the final centerline for `mode`.
    ///
    /// # Errors
    ///
    /// Propagates generator, closing and validation errors.
    pub fn centerline<R: Rng + ?Sized>(&self, mode: &GenerationMode, rng: &mut R) -> Result<Vec<Point2>> {
        let config = &self.config;
        let raw = match mode {
            GenerationMode::RandomArcWalk => ArcWalk::new(ArcWalkParams::from(config)).execute(rng)?,
            GenerationMode::Points(points) => points.clone(),
            GenerationMode::FixedPolar => {
                let anchors = AnchorSet::from_config(config)?;
                AnchorCurveFit::new(AnchorFitParams::from(config)).execute(&anchors)?
            }
            GenerationMode::RandomPolar => {
                let anchors = AnchorSet::random_from_config(config, rng)?;
                AnchorCurveFit::new(AnchorFitParams::from(config)).execute(&anchors)?
            }
            GenerationMode::RandomPolarWalk => {
                let anchors = AnchorSet::random_from_config(config, rng)?;
                HeadingWalk::new(HeadingWalkParams::from(config)).execute(&anchors, rng)?
            }
        };

        let mut centerline = dedup_consecutive(&raw);
        if centerline.len() < 2 {
            return Err(OperationError::InvalidInput(format!(
                "centerline needs at least 2 distinct points, got {}",
                centerline.len()
            ))
            .into());
        }
        if config.closed && !is_closed(&centerline) {
            centerline = TrackCloser::new(CloserParams::from(config)).execute(&centerline)?;
        }
        Ok(centerline)
    }

    /// Builds the centerline for `mode` and its borders.
    ///
    /// # Errors
    ///
    /// Propagates generator errors. Returns `OperationError::Failed` if the
    /// borders do not match the centerline length.
    pub fn build<R: Rng + ?Sized>(&self, mode: &GenerationMode, rng: &mut R) -> Result<Track> {
        let centerline = self.centerline(mode, rng)?;
        let borders = BorderOffset::from_config(&self.config).execute(&centerline)?;
        if borders.left.len() != centerline.len() || borders.right.len() != centerline.len() {
            return Err(OperationError::Failed(format!(
                "border lengths {}/{} differ from centerline length {}",
                borders.left.len(),
                borders.right.len(),
                centerline.len()
            ))
            .into());
        }

        let closed = is_closed(&centerline);
        tracing::debug!(mode = mode.name(), points = centerline.len(), closed, "track built");
        Ok(Track {
            centerline,
            borders,
            closed,
        })
    }

    /// The generation mode selected by `default_run_mode`. File modes read
    /// their centerline from the configured path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a file mode has no path configured
    /// and import errors if the file cannot be read.
    pub fn configured_mode(&self) -> Result<GenerationMode> {
        let config = &self.config;
        Ok(match config.default_run_mode {
            RunMode::RandomArcWalk => GenerationMode::RandomArcWalk,
            RunMode::FixedPolar => GenerationMode::FixedPolar,
            RunMode::RandomPolar => GenerationMode::RandomPolar,
            RunMode::RandomPolarWalk => GenerationMode::RandomPolarWalk,
            RunMode::ScriptFile => {
                let path = config.script_path.as_deref().ok_or_else(|| ConfigError::Invalid {
                    key: "script_path",
                    reason: "required by the script_file run mode".to_owned(),
                })?;
                GenerationMode::Points(io::load_script(path)?)
            }
            RunMode::CsvFile => {
                let path = config.csv_path.as_deref().ok_or_else(|| ConfigError::Invalid {
                    key: "csv_path",
                    reason: "required by the csv_file run mode".to_owned(),
                })?;
                GenerationMode::Points(io::load_delimited(path, config.csv_delimiter)?)
            }
        })
    }

    /// Builds a track using the configured run mode.
    ///
    /// # Errors
    ///
    /// See [`TrackBuilder::configured_mode`] and [`TrackBuilder::build`].
    pub fn build_configured<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Track> {
        let mode = self.configured_mode()?;
        self.build(&mode, rng)
    }
}
