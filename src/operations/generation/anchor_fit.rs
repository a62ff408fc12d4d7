use crate::config::TrackConfig;
use crate::error::Result;
use crate::geometry::{AnchorSet, CubicSpline2, Curve2, SplineBoundary};
use crate::math::polyline_2d::{dedup_consecutive, filter_min_spacing};
use crate::math::Point2;
use crate::operations::smoothing::CenterlineSmoothing;

use super::prepare_anchors;

/// Fewest anchors a curve can be fitted through.
pub const MIN_ANCHORS: usize = 3;

/// Fewest samples taken from a fitted curve.
pub const MIN_FIT_SAMPLES: usize = 150;

/// Samples taken per anchor when that exceeds [`MIN_FIT_SAMPLES`].
pub const SAMPLES_PER_ANCHOR: usize = 10;

/// Squared distance a sample must keep from the previously kept one.
pub const MIN_SPACING_SQ: f64 = 1e-3;

/// Parameters of the global anchor fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorFitParams {
    pub closed: bool,
    /// Moving-average window applied to the sampled curve (1 = disabled).
    pub smoothing_window: usize,
}

impl From<&TrackConfig> for AnchorFitParams {
    fn from(config: &TrackConfig) -> Self {
        Self {
            closed: config.closed,
            smoothing_window: config.smoothing_window,
        }
    }
}

/// Fits a chord-length parameterized cubic through sparse anchors and
/// samples it densely.
///
/// Closed fits use a periodic spline over the anchor loop, which is C2 at
/// the seam; the sampled curve spans exactly one period and its first and
/// last points are identical. Open fits use a natural spline.
#[derive(Debug)]
pub struct AnchorCurveFit {
    params: AnchorFitParams,
}

impl AnchorCurveFit {
    #[must_use]
    pub fn new(params: AnchorFitParams) -> Self {
        Self { params }
    }

    /// Fits and samples the curve through `anchors`.
    ///
    /// If the spline system cannot be solved the anchor polygon itself is
    /// used instead and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if fewer than
    /// [`MIN_ANCHORS`] distinct anchors are given.
    pub fn execute(&self, anchors: &AnchorSet) -> Result<Vec<Point2>> {
        let closed = self.params.closed;
        let mut knots = prepare_anchors(anchors.points(), closed)?;
        let anchor_count = knots.len();
        if closed {
            knots.push(knots[0]);
        }

        let boundary = if closed {
            SplineBoundary::Periodic
        } else {
            SplineBoundary::Natural
        };
        let sample_count = MIN_FIT_SAMPLES.max(SAMPLES_PER_ANCHOR * anchor_count);

        let mut points = match CubicSpline2::fit_chord_length(&knots, boundary)
            .and_then(|spline| spline.sample(sample_count))
        {
            Ok(samples) => samples,
            Err(e) => {
                tracing::warn!(error = %e, "anchor spline fit failed, using anchor polygon");
                knots.clone()
            }
        };

        if closed {
            force_closure(&mut points);
        }

        let filtered = filter_min_spacing(&points, MIN_SPACING_SQ);
        if filtered.len() >= 3 {
            points = filtered;
        }
        if closed {
            force_closure(&mut points);
        }

        let smoothed = CenterlineSmoothing::new(self.params.smoothing_window, closed).execute(&points);
        let result = dedup_consecutive(&smoothed);

        tracing::debug!(
            anchors = anchor_count,
            samples = sample_count,
            points = result.len(),
            closed,
            "anchor curve fitted"
        );
        Ok(result)
    }
}

/// Makes the last point equal the first by exact value.
fn force_closure(points: &mut [Point2]) {
    if let [first, .., last] = points {
        *last = *first;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn closed_fit() -> AnchorCurveFit {
        AnchorCurveFit::new(AnchorFitParams {
            closed: true,
            smoothing_window: 1,
        })
    }

    #[test]
    fn polar_diamond_closes_exactly() {
        let anchors = AnchorSet::from_polar(&[0.0, 90.0, 180.0, 270.0], &[10.0; 4]).unwrap();
        let points = closed_fit().execute(&anchors).unwrap();

        assert!(points.len() >= 100);
        assert_abs_diff_eq!(points[0].x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(points[0].y, 0.0, epsilon = 1e-9);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn closed_fit_passes_near_every_anchor() {
        let anchors = AnchorSet::from_polar(&[0.0, 90.0, 180.0, 270.0], &[10.0; 4]).unwrap();
        let points = closed_fit().execute(&anchors).unwrap();
        for anchor in anchors.points() {
            let nearest = points
                .iter()
                .map(|p| (p - anchor).norm())
                .fold(f64::INFINITY, f64::min);
            assert!(nearest < 0.5, "anchor {anchor:?} missed by {nearest}");
        }
    }

    #[test]
    fn samples_respect_min_spacing() {
        let anchors = AnchorSet::from_points(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]);
        let points = closed_fit().execute(&anchors).unwrap();
        for w in points[..points.len() - 1].windows(2) {
            assert!((w[1] - w[0]).norm_squared() > MIN_SPACING_SQ);
        }
    }

    #[test]
    fn open_fit_starts_and_ends_on_anchors() {
        let anchors = AnchorSet::from_points(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 3.0),
            Point2::new(10.0, 0.0),
            Point2::new(15.0, 4.0),
        ]);
        let points = AnchorCurveFit::new(AnchorFitParams {
            closed: false,
            smoothing_window: 1,
        })
        .execute(&anchors)
        .unwrap();
        assert_eq!(points[0], Point2::new(0.0, 0.0));
        let last = points.last().unwrap();
        assert_abs_diff_eq!(last.x, 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(last.y, 4.0, epsilon = 1e-9);
        assert_ne!(points.first(), points.last());
    }

    #[test]
    fn two_polar_anchors_are_rejected() {
        let anchors = AnchorSet::from_polar(&[0.0, 90.0], &[5.0, 5.0]).unwrap();
        let err = closed_fit().execute(&anchors).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn smoothing_keeps_closure() {
        let anchors = AnchorSet::from_polar(&[0.0, 72.0, 144.0, 216.0, 288.0], &[8.0, 12.0, 8.0, 12.0, 8.0]).unwrap();
        let points = AnchorCurveFit::new(AnchorFitParams {
            closed: true,
            smoothing_window: 5,
        })
        .execute(&anchors)
        .unwrap();
        assert_eq!(points.first(), points.last());
    }
}
