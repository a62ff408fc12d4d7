mod arc;
mod spline;

pub use arc::CircularArc;
pub use spline::{CubicSpline2, SplineBoundary};

use crate::error::Result;
use crate::math::{Point2, Vector2};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Length of the parameter range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Parameter at fraction `s` of the range.
    #[must_use]
    pub fn lerp(&self, s: f64) -> f64 {
        self.t_min + self.span() * s
    }
}

/// Trait for parametric curves in the plane.
pub trait Curve2 {
    /// Evaluates the curve at parameter `t`, returning the 2D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point2>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector2>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Samples `count` evenly spaced parameters across the whole domain,
    /// endpoints included.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    fn sample(&self, count: usize) -> Result<Vec<Point2>> {
        let domain = self.domain();
        if count < 2 {
            return Ok(vec![self.evaluate(domain.t_min)?]);
        }
        #[allow(clippy::cast_precision_loss)]
        let last = (count - 1) as f64;
        (0..count)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let s = k as f64 / last;
                self.evaluate(domain.lerp(s))
            })
            .collect()
    }
}
