use crate::config::TrackConfig;
use crate::error::{OperationError, Result};
use crate::geometry::BorderPair;
use crate::math::angle_2d::unit_normal;
use crate::math::polyline_2d::is_closed;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::operations::smoothing::moving_average;

/// Computes the left and right borders of a centerline at a constant
/// half-width.
///
/// # Algorithm
///
/// 1. **Tangents**: the normalized average of the incoming and outgoing
///    segment directions. Open ends use their single segment; closed tracks
///    (first == last) use the segments on both sides of the seam, and the
///    last index mirrors the first.
/// 2. **Normals**: tangents rotated by +90°. A zero tangent reuses the
///    previous normal, or `(0, 1)` at the first index.
/// 3. **Smoothing**: optional centered moving average of the normal field,
///    capped at a third of the point count and skipped below a window of 3.
///    Closed tracks are smoothed cyclically; open tracks keep their end
///    normals. The result is renormalized.
/// 4. **Offset**: `left = c + n·w/2`, `right = c − n·w/2`.
///
/// The borders always have the same length as the centerline.
#[derive(Debug, Clone, Copy)]
pub struct BorderOffset {
    width: f64,
    smoothing_window: usize,
}

impl BorderOffset {
    /// Creates a border offset for a track of the given full width.
    #[must_use]
    pub fn new(width: f64, smoothing_window: usize) -> Self {
        Self {
            width,
            smoothing_window,
        }
    }

    #[must_use]
    pub fn from_config(config: &TrackConfig) -> Self {
        Self::new(config.track_width, config.border_smoothing_window)
    }

    /// Executes the offset.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if fewer than 2 points are provided
    ///   or the width is negative or not finite
    pub fn execute(&self, centerline: &[Point2]) -> Result<BorderPair> {
        if centerline.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 points are required for border offset".to_owned(),
            )
            .into());
        }
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "track width must be finite and non-negative, got {}",
                self.width
            ))
            .into());
        }

        let closed = is_closed(centerline);
        let normals = self.smooth_normals(normals(centerline, closed), closed);
        let half = self.width * 0.5;

        let left = centerline
            .iter()
            .zip(&normals)
            .map(|(c, n)| c + n * half)
            .collect();
        let right = centerline
            .iter()
            .zip(&normals)
            .map(|(c, n)| c - n * half)
            .collect();
        Ok(BorderPair { left, right })
    }

    fn smooth_normals(&self, normals: Vec<Vector2>, closed: bool) -> Vec<Vector2> {
        let n = normals.len();
        let window = self.smoothing_window.min(n / 3);
        if window < 3 {
            return normals;
        }

        if closed {
            let distinct = &normals[..n - 1];
            let mut smoothed = moving_average(distinct, window, true);
            renormalize(&mut smoothed, distinct);
            smoothed.push(smoothed[0]);
            return smoothed;
        }

        let mut smoothed = moving_average(&normals, window, false);
        renormalize(&mut smoothed, &normals);
        smoothed[0] = normals[0];
        smoothed[n - 1] = normals[n - 1];
        smoothed
    }
}

/// Unit normals of a centerline, one per point.
fn normals(points: &[Point2], closed: bool) -> Vec<Vector2> {
    let n = points.len();
    let dir = |a: &Point2, b: &Point2| -> Vector2 {
        (b - a).try_normalize(TOLERANCE).unwrap_or_else(Vector2::zeros)
    };
    let bisect = |a: Vector2, b: Vector2| -> Vector2 {
        (a + b).try_normalize(TOLERANCE).unwrap_or_else(Vector2::zeros)
    };

    let mut out: Vec<Vector2> = Vec::with_capacity(n);
    for i in 0..n {
        let tangent = if closed && (i == 0 || i == n - 1) {
            bisect(dir(&points[n - 2], &points[0]), dir(&points[0], &points[1]))
        } else if i == 0 {
            dir(&points[0], &points[1])
        } else if i == n - 1 {
            dir(&points[n - 2], &points[n - 1])
        } else {
            bisect(dir(&points[i - 1], &points[i]), dir(&points[i], &points[i + 1]))
        };
        let fallback = out.last().copied().unwrap_or_else(|| Vector2::new(0.0, 1.0));
        out.push(unit_normal(&tangent, fallback));
    }
    out
}

/// Normalizes each smoothed vector, reverting to `original` where the
/// average cancelled out.
fn renormalize(smoothed: &mut [Vector2], original: &[Vector2]) {
    for (s, o) in smoothed.iter_mut().zip(original) {
        *s = s.try_normalize(TOLERANCE).unwrap_or(*o);
    }
}
