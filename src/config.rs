//! Track generation configuration.
//!
//! Every key has a default, so a partial (or empty) YAML document is a valid
//! configuration. Operations never read this type globally: callers pass it
//! (or parameter structs derived from it) explicitly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::geometry::SegmentKind;
use crate::operations::closing::ClosingStrategy;

/// Which generator a configured run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Random walk of straight-turn and arc segments.
    #[default]
    RandomArcWalk,
    /// Centerline imported from a whitespace-separated script file.
    ScriptFile,
    /// Centerline imported from a delimited text file.
    CsvFile,
    /// Global curve fit through the fixed polar anchors.
    FixedPolar,
    /// Global curve fit through randomly generated polar anchors.
    RandomPolar,
    /// Heading-matched walk through randomly generated polar anchors.
    RandomPolarWalk,
}

/// Full track generation configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Distance between the left and right borders.
    pub track_width: f64,
    /// Advance of a straight-turn segment.
    pub segment_length: f64,
    /// Largest turn (degrees) before a straight-turn segment.
    pub turn_angle_max: f64,
    /// Number of segments in a random walk.
    pub num_segments_random: usize,
    /// Segment kinds to draw from; repeated entries act as weights.
    pub curve_types_random: Vec<SegmentKind>,
    pub arc_radius_min: f64,
    pub arc_radius_max: f64,
    /// Largest arc sweep magnitude (degrees).
    pub arc_angle_max: f64,
    /// Points emitted per arc segment.
    pub arc_num_points: usize,
    /// Closing gaps longer than this multiple of the mean segment length are
    /// bridged with an arc instead of a straight line.
    pub max_closing_length_factor: f64,
    pub polar_angles_fixed: Vec<f64>,
    pub polar_distances_fixed: Vec<f64>,
    pub polar_angle_range_random: [f64; 2],
    pub polar_distance_range_random: [f64; 2],
    pub num_points_polar_random: usize,
    /// Moving-average window for centerline smoothing (1 = disabled).
    pub smoothing_window: usize,
    /// Moving-average window for border normals (below 3 = disabled).
    pub border_smoothing_window: usize,
    pub closing_strategy: ClosingStrategy,
    #[serde(alias = "create_closed_track_default")]
    pub closed: bool,
    pub default_run_mode: RunMode,
    #[serde(alias = "script_path_example")]
    pub script_path: Option<PathBuf>,
    #[serde(alias = "csv_path_example")]
    pub csv_path: Option<PathBuf>,
    pub csv_delimiter: char,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            track_width: 0.8,
            segment_length: 5.0,
            turn_angle_max: 45.0,
            num_segments_random: 20,
            curve_types_random: vec![SegmentKind::StraightTurn, SegmentKind::Arc],
            arc_radius_min: 5.0,
            arc_radius_max: 20.0,
            arc_angle_max: 90.0,
            arc_num_points: 10,
            max_closing_length_factor: 1.5,
            polar_angles_fixed: vec![0.0, 90.0, 180.0, 270.0],
            polar_distances_fixed: vec![10.0, 10.0, 10.0, 10.0],
            polar_angle_range_random: [0.0, 360.0],
            polar_distance_range_random: [5.0, 20.0],
            num_points_polar_random: 10,
            smoothing_window: 1,
            border_smoothing_window: 5,
            closing_strategy: ClosingStrategy::Spline,
            closed: true,
            default_run_mode: RunMode::RandomArcWalk,
            script_path: None,
            csv_path: None,
            csv_delimiter: ',',
        }
    }
}

impl TrackConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise see
    /// [`TrackConfig::from_yaml`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed YAML or unknown enum values
    /// and `ConfigError::Invalid` when a value fails [`TrackConfig::validate`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Checks value ranges that the generators rely on.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        fn invalid(key: &'static str, reason: &str) -> Result<()> {
            Err(ConfigError::Invalid {
                key,
                reason: reason.to_owned(),
            }
            .into())
        }

        let positive = |v: f64| v > 0.0;
        let non_negative = |v: f64| v >= 0.0;

        if !positive(self.track_width) {
            return invalid("track_width", "must be positive");
        }
        if !positive(self.segment_length) {
            return invalid("segment_length", "must be positive");
        }
        if !non_negative(self.turn_angle_max) {
            return invalid("turn_angle_max", "must not be negative");
        }
        if !positive(self.arc_radius_min) {
            return invalid("arc_radius_min", "must be positive");
        }
        if self.arc_radius_max < self.arc_radius_min {
            return invalid("arc_radius_max", "must not be below arc_radius_min");
        }
        if !non_negative(self.arc_angle_max) {
            return invalid("arc_angle_max", "must not be negative");
        }
        if self.arc_num_points == 0 {
            return invalid("arc_num_points", "must be at least 1");
        }
        if !positive(self.max_closing_length_factor) {
            return invalid("max_closing_length_factor", "must be positive");
        }
        if self.smoothing_window == 0 {
            return invalid("smoothing_window", "must be at least 1 (1 disables smoothing)");
        }
        let [a_min, a_max] = self.polar_angle_range_random;
        if a_max < a_min {
            return invalid("polar_angle_range_random", "range is reversed");
        }
        let [d_min, d_max] = self.polar_distance_range_random;
        if d_max < d_min || d_min < 0.0 {
            return invalid(
                "polar_distance_range_random",
                "range must be ordered and non-negative",
            );
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TrackError;

    #[test]
    fn test_default_config() {
        let config = TrackConfig::default();
        assert_eq!(config.track_width, 0.8);
        assert_eq!(config.arc_num_points, 10);
        assert_eq!(config.smoothing_window, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TrackConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = TrackConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "track_width: 2.0\ncurve_types_random: [arc, arc, straight_turn]\n";
        let config = TrackConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.track_width, 2.0);
        assert_eq!(config.curve_types_random.len(), 3);
        assert_eq!(config.segment_length, 5.0);
    }

    #[test]
    fn test_legacy_key_aliases() {
        let yaml = "create_closed_track_default: false\nscript_path_example: tracks/a.txt\n";
        let config = TrackConfig::from_yaml(yaml).unwrap();
        assert!(!config.closed);
        assert_eq!(config.script_path, Some(PathBuf::from("tracks/a.txt")));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(TrackConfig::from_yaml("  \n").unwrap(), TrackConfig::default());
    }

    #[test]
    fn test_unknown_segment_kind_fails_to_parse() {
        let err = TrackConfig::from_yaml("curve_types_random: [spiral]").unwrap_err();
        assert!(matches!(err, TrackError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_width_is_rejected() {
        let err = TrackConfig::from_yaml("track_width: -1.0").unwrap_err();
        assert!(matches!(
            err,
            TrackError::Config(ConfigError::Invalid {
                key: "track_width",
                ..
            })
        ));
    }

    #[test]
    fn test_reversed_radius_bounds_are_rejected() {
        let config = TrackConfig {
            arc_radius_min: 10.0,
            arc_radius_max: 5.0,
            ..TrackConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_io() {
        let err = TrackConfig::load(Path::new("/nonexistent/trackgen.yaml")).unwrap_err();
        assert!(matches!(err, TrackError::Config(ConfigError::Io(_))));
    }
}
