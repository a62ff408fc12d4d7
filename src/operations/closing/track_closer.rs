use serde::{Deserialize, Serialize};

use crate::config::TrackConfig;
use crate::error::{OperationError, Result};
use crate::geometry::{CircularArc, CubicSpline2, Pose2, SplineBoundary};
use crate::math::angle_2d::{heading_between, heading_difference};
use crate::math::arc_2d::arc_piece_count;
use crate::math::polyline_2d::{average_segment_length, cumulative_lengths, dedup_consecutive};
use crate::math::Point2;
use crate::operations::bridge::{biarc, straight_samples};

/// Heading disagreement (degrees) above which the analytic bridge uses a biarc.
pub const ARC_CLOSING_THRESHOLD_DEG: f64 = 30.0;

/// Angular step (degrees) between samples of a closing arc.
pub const ARC_CLOSING_STEP_DEG: f64 = 15.0;

/// Trailing fraction of the open track re-sampled by the spline bridge.
pub const SPLINE_CLOSING_FRACTION: f64 = 0.2;

/// How an open centerline is bridged back to its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingStrategy {
    /// Periodic spline re-fit of the whole loop; falls back to [`ClosingStrategy::Arc`].
    #[default]
    Spline,
    /// Local biarc matching both end headings, or a straight line for short
    /// aligned gaps.
    Arc,
}

/// Parameters of the track closer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloserParams {
    pub strategy: ClosingStrategy,
    /// Gaps longer than this multiple of the mean segment length get a biarc.
    pub max_closing_length_factor: f64,
}

impl From<&TrackConfig> for CloserParams {
    fn from(config: &TrackConfig) -> Self {
        Self {
            strategy: config.closing_strategy,
            max_closing_length_factor: config.max_closing_length_factor,
        }
    }
}

impl Default for CloserParams {
    fn default() -> Self {
        Self::from(&TrackConfig::default())
    }
}

/// Bridges an open centerline back to its first point.
///
/// The result always ends on the first point by exact value.
#[derive(Debug)]
pub struct TrackCloser {
    params: CloserParams,
}

impl TrackCloser {
    #[must_use]
    pub fn new(params: CloserParams) -> Self {
        Self { params }
    }

    /// Closes `points`. Input that already ends on its first point is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if fewer than 2 distinct
    /// points are given.
    pub fn execute(&self, points: &[Point2]) -> Result<Vec<Point2>> {
        if points.len() >= 2 && points.first() == points.last() {
            return Ok(points.to_vec());
        }
        let points = dedup_consecutive(points);
        if points.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 distinct points are required to close a track".to_owned(),
            )
            .into());
        }

        let closed = match self.params.strategy {
            ClosingStrategy::Spline => match spline_bridge(&points) {
                Ok(closed) => closed,
                Err(e) => {
                    tracing::warn!(error = %e, "spline closing failed, using arc bridge");
                    self.arc_bridge(&points)?
                }
            },
            ClosingStrategy::Arc => self.arc_bridge(&points)?,
        };

        let closed = dedup_consecutive(&closed);
        tracing::debug!(
            strategy = ?self.params.strategy,
            input = points.len(),
            output = closed.len(),
            "track closed"
        );
        Ok(closed)
    }

    /// Analytic bridge: a biarc leaving along the last heading and arriving
    /// along the first one, or evenly split straight pieces when the gap is
    /// short and the end, the start and the gap all point the same way.
    fn arc_bridge(&self, points: &[Point2]) -> Result<Vec<Point2>> {
        let n = points.len();
        let first = points[0];
        let last = points[n - 1];
        let avg = average_segment_length(points);
        let gap = (first - last).norm();

        let start_heading = heading_between(&points[0], &points[1]).unwrap_or(0.0);
        let end_heading = heading_between(&points[n - 2], &points[n - 1]).unwrap_or(start_heading);
        let gap_heading = heading_between(&last, &first).unwrap_or(start_heading);
        let threshold = ARC_CLOSING_THRESHOLD_DEG.to_radians();
        let aligned = [
            heading_difference(end_heading, start_heading),
            heading_difference(end_heading, gap_heading),
            heading_difference(gap_heading, start_heading),
        ]
        .iter()
        .all(|d| d.abs() <= threshold);

        let mut closed = points.to_vec();
        if aligned && gap <= avg * self.params.max_closing_length_factor {
            closed.extend(straight_samples(&last, &first, avg));
        } else {
            let step = ARC_CLOSING_STEP_DEG.to_radians();
            let (samples, _) = biarc(
                &Pose2::new(last, end_heading),
                &Pose2::new(first, start_heading),
                avg,
                |arc: &CircularArc| arc_piece_count(arc.sweep(), step, 3),
            )?;
            closed.extend(samples);
        }
        closed.push(first);
        Ok(closed)
    }
}

/// Periodic spline bridge: fits the loop through every point and re-samples
/// the trailing [`SPLINE_CLOSING_FRACTION`] of the track through the seam.
fn spline_bridge(points: &[Point2]) -> Result<Vec<Point2>> {
    let n = points.len();
    if n < 3 {
        return Err(OperationError::Failed(
            "spline closing needs at least 3 distinct points".to_owned(),
        )
        .into());
    }

    let mut knots = points.to_vec();
    knots.push(points[0]);
    let params = cumulative_lengths(&knots);
    let spline = CubicSpline2::fit(&knots, &params, SplineBoundary::Periodic)?;

    let open_end = params[n - 1];
    let loop_end = params[n];
    let cut = (1.0 - SPLINE_CLOSING_FRACTION) * open_end;
    let keep = params[..n].partition_point(|&t| t <= cut).max(1);
    let resume = params[keep - 1];

    let spacing = average_segment_length(points);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = ((loop_end - resume) / spacing).ceil().max(2.0) as usize;
    #[allow(clippy::cast_precision_loss)]
    let step = (loop_end - resume) / count as f64;

    let mut closed = points[..keep].to_vec();
    closed.extend((1..count).map(|k| {
        #[allow(clippy::cast_precision_loss)]
        let t = resume + step * k as f64;
        spline.point_at(t)
    }));
    closed.push(points[0]);
    Ok(closed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::generation::{ArcWalk, ArcWalkParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    /// Three quarters of a circle of radius 10, counter-clockwise from (10, 0).
    fn open_circle() -> Vec<Point2> {
        (0..=27)
            .map(|k| {
                let a = f64::from(k) * (1.5 * PI / 27.0);
                Point2::new(10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect()
    }

    fn closer(strategy: ClosingStrategy) -> TrackCloser {
        TrackCloser::new(CloserParams {
            strategy,
            max_closing_length_factor: 1.5,
        })
    }

    fn assert_bridge_spacing(input: &[Point2], closed: &[Point2]) {
        let avg = average_segment_length(input);
        let gap = (input[0] - input[input.len() - 1]).norm();
        let bound = avg.max(gap) + 1e-9;
        for w in closed.windows(2) {
            let d = (w[1] - w[0]).norm();
            assert!(d <= bound, "spacing {d} exceeds {bound}");
        }
    }

    /// Largest heading change from the last chord of the open input,
    /// through the bridge, into the first chord.
    fn bridge_turn_deg(open_len: usize, closed: &[Point2]) -> f64 {
        let mut chords: Vec<f64> = closed[open_len - 2..]
            .windows(2)
            .map(|w| heading_between(&w[0], &w[1]).unwrap())
            .collect();
        chords.push(heading_between(&closed[0], &closed[1]).unwrap());
        chords
            .windows(2)
            .map(|w| heading_difference(w[0], w[1]).abs().to_degrees())
            .fold(0.0, f64::max)
    }

    #[test]
    fn arc_strategy_closes_exactly() {
        let input = open_circle();
        let closed = closer(ClosingStrategy::Arc).execute(&input).unwrap();
        assert_eq!(closed.first(), closed.last());
        assert!(closed.len() > input.len());
        assert_bridge_spacing(&input, &closed);
    }

    #[test]
    fn spline_strategy_closes_exactly() {
        let input = open_circle();
        let closed = closer(ClosingStrategy::Spline).execute(&input).unwrap();
        assert_eq!(closed.first(), closed.last());
        assert_bridge_spacing(&input, &closed);
    }

    #[test]
    fn spline_bridge_stays_near_the_circle() {
        let closed = closer(ClosingStrategy::Spline).execute(&open_circle()).unwrap();
        for p in &closed {
            let r = p.coords.norm();
            assert!((r - 10.0).abs() < 2.0, "radius {r}");
        }
    }

    #[test]
    fn heading_mismatch_selects_arc_or_line() {
        let input = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.5),
        ];
        // Last heading is -90° and the first is 0°: a biarc is required.
        let closed = closer(ClosingStrategy::Arc).execute(&input).unwrap();
        assert_eq!(closed.first(), closed.last());
        assert!(closed.len() > input.len() + 1);
        assert!(bridge_turn_deg(input.len(), &closed) <= ARC_CLOSING_THRESHOLD_DEG);

        // Ends heading +x just behind the start.
        let aligned = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(-2.0, 2.0),
            Point2::new(-2.0, -0.5),
            Point2::new(-1.0, -0.5),
        ];
        let closed = closer(ClosingStrategy::Arc).execute(&aligned).unwrap();
        assert_eq!(closed.len(), aligned.len() + 1);
        assert_eq!(closed.last(), Some(&Point2::new(0.0, 0.0)));
    }

    #[test]
    fn arc_bridge_meets_both_headings() {
        let walk = ArcWalk::new(ArcWalkParams::from(&TrackConfig::default()));
        for seed in 0..100 {
            let open = walk.execute(&mut StdRng::seed_from_u64(seed)).unwrap();
            let closed = closer(ClosingStrategy::Arc).execute(&open).unwrap();
            assert_eq!(closed.first(), closed.last());
            assert_eq!(&closed[..open.len()], &open[..]);
            let turn = bridge_turn_deg(open.len(), &closed);
            assert!(
                turn <= ARC_CLOSING_THRESHOLD_DEG + 1e-6,
                "seed {seed}: turn of {turn}° across the bridge"
            );
        }
    }

    #[test]
    fn two_points_fall_back_to_arc_bridge() {
        let input = vec![Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)];
        let closed = closer(ClosingStrategy::Spline).execute(&input).unwrap();
        assert_eq!(closed.first(), closed.last());
        assert!(closed.len() >= 3);
    }

    #[test]
    fn closed_input_is_unchanged() {
        let mut input = open_circle();
        input.push(input[0]);
        let closed = closer(ClosingStrategy::Spline).execute(&input).unwrap();
        assert_eq!(closed, input);
    }

    #[test]
    fn single_point_is_rejected() {
        let err = closer(ClosingStrategy::Arc)
            .execute(&[Point2::new(1.0, 1.0)])
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
