use crate::error::{GeometryError, OperationError, Result};
use crate::math::polyline_2d::{chord_parameters, is_closed};
use crate::math::tridiagonal::{solve_cyclic_tridiagonal, solve_tridiagonal};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve2, CurveDomain};

/// End conditions for an interpolating cubic spline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineBoundary {
    /// Zero second derivative at both ends (open curves).
    Natural,
    /// First and second derivatives wrap around; the input must be closed.
    Periodic,
}

/// Interpolating cubic spline of one coordinate, stored as knot values and
/// second derivatives ("moments") at the knots.
#[derive(Debug, Clone)]
struct CubicSpline1 {
    knots: Vec<f64>,
    values: Vec<f64>,
    moments: Vec<f64>,
}

impl CubicSpline1 {
    fn fit(knots: &[f64], values: &[f64], boundary: SplineBoundary) -> Result<Self> {
        let n = knots.len() - 1;
        let h: Vec<f64> = knots.windows(2).map(|w| w[1] - w[0]).collect();
        let slope = |i: usize| (values[i + 1] - values[i]) / h[i];

        let moments = match boundary {
            SplineBoundary::Natural => {
                let mut moments = vec![0.0; n + 1];
                if n >= 2 {
                    let m = n - 1;
                    let mut sub = vec![0.0; m];
                    let mut diag = vec![0.0; m];
                    let mut sup = vec![0.0; m];
                    let mut rhs = vec![0.0; m];
                    for row in 0..m {
                        let i = row + 1;
                        sub[row] = h[i - 1];
                        diag[row] = 2.0 * (h[i - 1] + h[i]);
                        sup[row] = h[i];
                        rhs[row] = 6.0 * (slope(i) - slope(i - 1));
                    }
                    let interior = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;
                    moments[1..n].copy_from_slice(&interior);
                }
                moments
            }
            SplineBoundary::Periodic => {
                let mut sub = vec![0.0; n];
                let mut diag = vec![0.0; n];
                let mut sup = vec![0.0; n];
                let mut rhs = vec![0.0; n];
                for i in 0..n {
                    let prev = (i + n - 1) % n;
                    sub[i] = h[prev];
                    diag[i] = 2.0 * (h[prev] + h[i]);
                    sup[i] = h[i];
                    rhs[i] = 6.0 * (slope(i) - slope(prev));
                }
                let wrap = h[n - 1];
                let mut moments = solve_cyclic_tridiagonal(&sub, &diag, &sup, wrap, wrap, &rhs)?;
                moments.push(moments[0]);
                moments
            }
        };

        Ok(Self {
            knots: knots.to_vec(),
            values: values.to_vec(),
            moments,
        })
    }

    /// Index of the interval containing `u` (clamped to the valid range).
    fn interval(&self, u: f64) -> usize {
        let last = self.knots.len() - 2;
        self.knots.partition_point(|&k| k <= u).saturating_sub(1).min(last)
    }

    fn value(&self, u: f64) -> f64 {
        let i = self.interval(u);
        let (t0, t1) = (self.knots[i], self.knots[i + 1]);
        let h = t1 - t0;
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);
        let (a, b) = (t1 - u, u - t0);
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (self.values[i] / h - m0 * h / 6.0) * a
            + (self.values[i + 1] / h - m1 * h / 6.0) * b
    }

    fn derivative(&self, u: f64) -> f64 {
        let i = self.interval(u);
        let (t0, t1) = (self.knots[i], self.knots[i + 1]);
        let h = t1 - t0;
        let (m0, m1) = (self.moments[i], self.moments[i + 1]);
        let (a, b) = (t1 - u, u - t0);
        -m0 * a * a / (2.0 * h)
            + m1 * b * b / (2.0 * h)
            + (self.values[i + 1] - self.values[i]) / h
            - (m1 - m0) * h / 6.0
    }
}

/// Parametric interpolating cubic spline `t ↦ (x(t), y(t))`.
///
/// Both coordinates share the same knot vector. With
/// [`SplineBoundary::Periodic`] the curve is C2 across the seam and
/// parameters outside the domain wrap around; with
/// [`SplineBoundary::Natural`] parameters are clamped to the domain.
#[derive(Debug, Clone)]
pub struct CubicSpline2 {
    x: CubicSpline1,
    y: CubicSpline1,
    boundary: SplineBoundary,
}

impl CubicSpline2 {
    /// Fits a spline through `points` at the given parameters.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if lengths differ, fewer than 2 points
    ///   are given, or a periodic fit receives an open or too short sequence
    /// - `GeometryError::Degenerate` if parameters are not strictly increasing
    /// - `OperationError::Failed` if the spline system is singular
    pub fn fit(points: &[Point2], params: &[f64], boundary: SplineBoundary) -> Result<Self> {
        if points.len() != params.len() {
            return Err(OperationError::InvalidInput(format!(
                "{} points but {} parameters",
                points.len(),
                params.len()
            ))
            .into());
        }
        if points.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 points are required for spline fitting".to_owned(),
            )
            .into());
        }
        if boundary == SplineBoundary::Periodic && (points.len() < 4 || !is_closed(points)) {
            return Err(OperationError::InvalidInput(
                "periodic spline needs a closed sequence with at least 3 distinct points"
                    .to_owned(),
            )
            .into());
        }
        if params.windows(2).any(|w| w[1] - w[0] <= TOLERANCE) {
            return Err(GeometryError::Degenerate(
                "spline parameters must be strictly increasing".into(),
            )
            .into());
        }

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        Ok(Self {
            x: CubicSpline1::fit(params, &xs, boundary)?,
            y: CubicSpline1::fit(params, &ys, boundary)?,
            boundary,
        })
    }

    /// Fits a spline using normalized chord-length parameters in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// See [`CubicSpline2::fit`].
    pub fn fit_chord_length(points: &[Point2], boundary: SplineBoundary) -> Result<Self> {
        Self::fit(points, &chord_parameters(points), boundary)
    }

    /// Returns the boundary condition used for the fit.
    #[must_use]
    pub fn boundary(&self) -> SplineBoundary {
        self.boundary
    }

    fn knot_range(&self) -> (f64, f64) {
        let knots = &self.x.knots;
        (knots[0], knots[knots.len() - 1])
    }

    /// Maps a parameter into the domain: wrapped when periodic, clamped otherwise.
    fn normalize(&self, t: f64) -> f64 {
        let (t_min, t_max) = self.knot_range();
        match self.boundary {
            SplineBoundary::Periodic => t_min + (t - t_min).rem_euclid(t_max - t_min),
            SplineBoundary::Natural => t.clamp(t_min, t_max),
        }
    }

    /// Evaluates the spline; never fails.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let u = self.normalize(t);
        Point2::new(self.x.value(u), self.y.value(u))
    }

    /// First derivative with respect to the parameter.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector2 {
        let u = self.normalize(t);
        Vector2::new(self.x.derivative(u), self.y.derivative(u))
    }
}

impl Curve2 for CubicSpline2 {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        let d = self.derivative_at(t);
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    fn domain(&self) -> CurveDomain {
        let (t_min, t_max) = self.knot_range();
        CurveDomain::new(t_min, t_max)
    }

    fn is_closed(&self) -> bool {
        self.boundary == SplineBoundary::Periodic
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn diamond() -> Vec<Point2> {
        vec![
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
            Point2::new(-10.0, 0.0),
            Point2::new(0.0, -10.0),
            Point2::new(10.0, 0.0),
        ]
    }

    #[test]
    fn natural_spline_interpolates_knots() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 3.0),
            Point2::new(6.0, 1.0),
        ];
        let spline = CubicSpline2::fit_chord_length(&pts, SplineBoundary::Natural).unwrap();
        let params = chord_parameters(&pts);
        for (p, t) in pts.iter().zip(&params) {
            let q = spline.point_at(*t);
            assert_abs_diff_eq!(q.x, p.x, epsilon = 1e-9);
            assert_abs_diff_eq!(q.y, p.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn natural_spline_of_collinear_points_is_a_line() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 3.0),
        ];
        let spline = CubicSpline2::fit_chord_length(&pts, SplineBoundary::Natural).unwrap();
        let q = spline.point_at(0.37);
        assert_abs_diff_eq!(q.x, q.y, epsilon = 1e-9);
    }

    #[test]
    fn two_points_give_a_segment() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)];
        let spline = CubicSpline2::fit_chord_length(&pts, SplineBoundary::Natural).unwrap();
        assert_abs_diff_eq!(spline.point_at(0.25).x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn periodic_spline_is_smooth_across_seam() {
        let spline = CubicSpline2::fit_chord_length(&diamond(), SplineBoundary::Periodic).unwrap();
        let before = spline.derivative_at(1.0 - 1e-9);
        let after = spline.derivative_at(1e-9);
        assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-5);
        assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-5);
        // Symmetric input: the tangent at (10, 0) is vertical.
        let t = spline.tangent(0.0).unwrap();
        assert_abs_diff_eq!(t.x, 0.0, epsilon = 1e-9);
        assert!(t.y > 0.0);
    }

    #[test]
    fn periodic_spline_wraps_parameters() {
        let spline = CubicSpline2::fit_chord_length(&diamond(), SplineBoundary::Periodic).unwrap();
        let a = spline.point_at(0.3);
        let b = spline.point_at(1.3);
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_eq!(spline.boundary(), SplineBoundary::Periodic);
        assert!(spline.is_closed());
    }

    #[test]
    fn periodic_requires_closed_input() {
        let mut open = diamond();
        open.pop();
        let err = CubicSpline2::fit_chord_length(&open, SplineBoundary::Periodic).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn repeated_points_are_degenerate() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 1.0),
        ];
        assert!(CubicSpline2::fit_chord_length(&pts, SplineBoundary::Natural).is_err());
    }

    #[test]
    fn uniform_samples_span_domain() {
        let spline = CubicSpline2::fit_chord_length(&diamond(), SplineBoundary::Periodic).unwrap();
        let pts = spline.sample(5).unwrap();
        assert_eq!(pts.len(), 5);
        assert_abs_diff_eq!(pts[0].x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[4].x, 10.0, epsilon = 1e-9);
    }
}
