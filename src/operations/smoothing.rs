use crate::math::polyline_2d::is_closed;
use crate::math::{Point2, Vector2};

/// Centered moving average over a sequence of vectors.
///
/// The window spans `(window - 1) / 2` entries before and `window / 2`
/// entries after each index. When `cyclic` is set, indices wrap around and
/// the window is capped at the sequence length; otherwise the window
/// shrinks at both ends. A window below 2 returns the input unchanged.
#[must_use]
pub fn moving_average(values: &[Vector2], window: usize, cyclic: bool) -> Vec<Vector2> {
    let n = values.len();
    if window < 2 || n < 2 {
        return values.to_vec();
    }
    let window = if cyclic { window.min(n) } else { window };
    let before = (window - 1) / 2;
    let after = window / 2;

    (0..n)
        .map(|i| {
            let (sum, count) = if cyclic {
                let sum = (0..window)
                    .map(|k| values[(i + n - before + k) % n])
                    .fold(Vector2::zeros(), |acc, v| acc + v);
                (sum, window)
            } else {
                let lo = i.saturating_sub(before);
                let hi = (i + after).min(n - 1);
                let sum = values[lo..=hi]
                    .iter()
                    .fold(Vector2::zeros(), |acc, v| acc + v);
                (sum, hi - lo + 1)
            };
            #[allow(clippy::cast_precision_loss)]
            let count = count as f64;
            sum / count
        })
        .collect()
}

/// Moving-average smoothing of a centerline's x and y coordinates.
///
/// Closed centerlines are smoothed cyclically over their distinct points and
/// the first point is re-appended, so the result stays closed by exact value.
#[derive(Debug, Clone, Copy)]
pub struct CenterlineSmoothing {
    window: usize,
    closed: bool,
}

impl CenterlineSmoothing {
    /// Creates a smoothing pass. A window of 1 (or 0) disables it.
    #[must_use]
    pub fn new(window: usize, closed: bool) -> Self {
        Self { window, closed }
    }

    /// Applies the smoothing pass.
    #[must_use]
    pub fn execute(&self, points: &[Point2]) -> Vec<Point2> {
        if self.window < 2 || points.len() < 3 {
            return points.to_vec();
        }

        let cyclic = self.closed && is_closed(points);
        let distinct = if cyclic {
            &points[..points.len() - 1]
        } else {
            points
        };

        let coords: Vec<Vector2> = distinct.iter().map(|p| p.coords).collect();
        let mut smoothed: Vec<Point2> = moving_average(&coords, self.window, cyclic)
            .into_iter()
            .map(Point2::from)
            .collect();

        if cyclic {
            smoothed.push(smoothed[0]);
        }
        tracing::debug!(window = self.window, cyclic, points = smoothed.len(), "smoothed centerline");
        smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn window_of_one_is_identity() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 5.0), Point2::new(2.0, 0.0)];
        assert_eq!(CenterlineSmoothing::new(1, false).execute(&pts), pts);
    }

    #[test]
    fn open_smoothing_shrinks_window_at_ends() {
        let values = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(3.0, 0.0),
            Vector2::new(6.0, 0.0),
        ];
        let out = moving_average(&values, 3, false);
        assert_abs_diff_eq!(out[0].x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1].x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2].x, 4.5, epsilon = 1e-12);
    }

    #[test]
    fn cyclic_average_wraps_around() {
        let values = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(3.0, 0.0),
            Vector2::new(6.0, 0.0),
            Vector2::new(3.0, 0.0),
        ];
        let out = moving_average(&values, 3, true);
        // Index 0 averages indices 3, 0 and 1.
        assert_abs_diff_eq!(out[0].x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2].x, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn closed_centerline_stays_closed() {
        let pts = vec![
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
            Point2::new(0.0, -1.0),
            Point2::new(1.0, 0.0),
        ];
        let out = CenterlineSmoothing::new(3, true).execute(&pts);
        assert_eq!(out.len(), pts.len());
        assert_eq!(out.first(), out.last());
        // Symmetric square: the centroid stays at the origin.
        let cx: f64 = out[..4].iter().map(|p| p.x).sum();
        assert_abs_diff_eq!(cx, 0.0, epsilon = 1e-12);
    }
}
